//! Run configuration resolution and validation
//!
//! A run configuration is a flat string-to-string mapping of environment
//! variables handed to every runner invocation. It comes either from a YAML
//! file or from an inline option map; both sources end in the same
//! validation pass.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::common::{Error, Result};

/// Key every run configuration must define.
pub const GUEST_KEY: &str = "GUEST";

/// Where the run configuration comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// In-memory option map supplied by the caller
    Options,
    /// Top-level string mapping read from a YAML file
    File,
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "options" => Ok(Self::Options),
            "file" => Ok(Self::File),
            other => Err(Error::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options => write!(f, "options"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Validated environment mapping for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    values: BTreeMap<String, String>,
}

impl RunConfiguration {
    /// Resolve a configuration from the given source and validate it.
    ///
    /// `File` mode requires a non-empty path to an existing file whose top
    /// level is a string mapping; `Options` mode requires a non-empty map.
    /// Both paths end in the `GUEST` presence check.
    pub fn resolve(
        mode: ExecutionMode,
        yaml_path: Option<&Path>,
        options: Option<&BTreeMap<String, String>>,
    ) -> Result<Self> {
        let values = match mode {
            ExecutionMode::File => Self::read_file(yaml_path)?,
            ExecutionMode::Options => match options {
                Some(map) if !map.is_empty() => map.clone(),
                _ => return Err(Error::OptionsNotSet),
            },
        };

        let config = Self { values };
        config.validate()?;
        Ok(config)
    }

    fn read_file(yaml_path: Option<&Path>) -> Result<BTreeMap<String, String>> {
        let path = match yaml_path {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Err(Error::ConfigPathNotSet),
        };

        if !path.exists() {
            return Err(Error::ConfigFileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if !self.values.contains_key(GUEST_KEY) {
            return Err(Error::GuestNotSet);
        }
        Ok(())
    }

    /// Write every pair into the current process environment, overwriting
    /// pre-existing variables of the same name. Variables are applied one
    /// key at a time with no rollback on partial failure.
    pub fn apply(&self) {
        for (key, value) in &self.values {
            std::env::set_var(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
