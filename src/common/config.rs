//! Tool configuration file handling
//!
//! An optional `config.toml` in the platform config directory can pin the
//! external runner binary and default run parameters. Everything has a
//! serde default, so a missing file means built-in behavior.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Main tool settings structure
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// External runner configuration
    #[serde(default)]
    pub runner: RunnerSettings,

    /// Default run parameters, overridable per invocation on the CLI
    #[serde(default)]
    pub defaults: Defaults,
}

/// External runner configuration
#[derive(Debug, Deserialize)]
pub struct RunnerSettings {
    /// Name or path of the runner executable
    #[serde(default = "default_runner_bin")]
    pub bin: String,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            bin: default_runner_bin(),
        }
    }
}

fn default_runner_bin() -> String {
    "avocado".to_string()
}

/// Default run parameters
#[derive(Debug, Deserialize)]
pub struct Defaults {
    /// Tag handed to the runner when `-t` is not given
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Target list used when `-b` is not given
    #[serde(default)]
    pub targets: Option<Vec<String>>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            targets: None,
        }
    }
}

fn default_tag() -> String {
    "machines".to_string()
}

impl Settings {
    /// Load settings from the default config file
    ///
    /// Returns default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })?;
                return toml::from_str(&content).map_err(|e| Error::Config(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Resolve the runner executable path
    ///
    /// An explicit path (anything with a directory component) is used as-is;
    /// a bare name is searched on PATH, falling back to the bare name so the
    /// spawn itself reports the lookup failure.
    pub fn runner_bin(&self) -> PathBuf {
        let bin = Path::new(&self.runner.bin);
        if bin.components().count() > 1 {
            return bin.to_path_buf();
        }
        which::which(bin).unwrap_or_else(|_| bin.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.runner.bin, "avocado");
        assert_eq!(settings.defaults.tag, "machines");
        assert!(settings.defaults.targets.is_none());
    }

    #[test]
    fn settings_parse_overrides() {
        let settings: Settings = toml::from_str(
            r#"
[runner]
bin = "/opt/avocado/bin/avocado"

[defaults]
tag = "nightly"
targets = ["chrome", "firefox"]
"#,
        )
        .unwrap();
        assert_eq!(settings.runner.bin, "/opt/avocado/bin/avocado");
        assert_eq!(settings.defaults.tag, "nightly");
        assert_eq!(
            settings.defaults.targets.as_deref(),
            Some(&["chrome".to_string(), "firefox".to_string()][..])
        );
    }

    #[test]
    fn explicit_runner_path_is_kept() {
        let settings: Settings = toml::from_str("[runner]\nbin = \"/opt/bin/runner\"").unwrap();
        assert_eq!(settings.runner_bin(), PathBuf::from("/opt/bin/runner"));
    }

    #[test]
    fn unknown_bare_runner_name_falls_back_unchanged() {
        let settings: Settings =
            toml::from_str("[runner]\nbin = \"definitely-not-on-path-4f2a\"").unwrap();
        assert_eq!(
            settings.runner_bin(),
            PathBuf::from("definitely-not-on-path-4f2a")
        );
    }
}
