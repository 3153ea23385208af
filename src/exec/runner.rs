//! Per-target suite execution
//!
//! Expands one validated run configuration into one external-runner
//! invocation per browser target. Targets run strictly in sequence; each
//! child gets its own explicit environment (the resolved configuration plus
//! `BROWSER`), so nothing leaks between iterations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use colored::Colorize;
use rand::Rng;
use serde::Serialize;
use tokio::process::Command;
use tracing::{info, warn};

use crate::common::{Error, Result};
use crate::exec::config::{ExecutionMode, RunConfiguration};

/// Environment key naming the active target for the child process.
pub const BROWSER_KEY: &str = "BROWSER";

/// Targets used when the caller supplies no browser list.
pub const DEFAULT_TARGETS: [&str; 3] = ["chrome", "firefox", "edge"];

/// Everything needed for one top-level run.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    /// Path to the test cases handed to the runner
    pub cases_path: PathBuf,
    /// Where the run configuration comes from
    pub mode: ExecutionMode,
    /// Configuration file for `File` mode
    pub yaml_path: Option<PathBuf>,
    /// Inline configuration for `Options` mode
    pub options: Option<BTreeMap<String, String>>,
    /// Base directory for per-target result directories
    pub results_root: Option<PathBuf>,
    /// Tag forwarded to the runner
    pub tag: String,
    /// Ordered target sequence, one invocation per element
    pub targets: Vec<String>,
}

/// Recorded result of a single runner invocation
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub target: String,
    /// Exit code of the runner process; `None` when the process could not
    /// be spawned or was killed by a signal
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Split a caller-supplied browser string into the target sequence.
pub fn parse_target_list(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Result directory for one invocation: `<root>/<target>`, with a random
/// 4-hex-digit token standing in for an empty target name.
pub fn derive_result_dir(results_root: &Path, target: &str) -> PathBuf {
    if target.is_empty() {
        results_root.join(format!("{:04x}", rand::thread_rng().gen::<u16>()))
    } else {
        results_root.join(target)
    }
}

/// Orchestrates one runner invocation per target
pub struct SuiteRunner {
    request: ExecutionRequest,
    runner_bin: PathBuf,
}

impl SuiteRunner {
    pub fn new(request: ExecutionRequest, runner_bin: PathBuf) -> Self {
        Self {
            request,
            runner_bin,
        }
    }

    /// Run the suite once for a single target.
    ///
    /// The cases path is checked first, then the configuration is resolved
    /// fresh for this target; either failure aborts before anything is
    /// spawned. The runner's own exit status is recorded, never interpreted:
    /// a non-zero exit or a spawn failure becomes part of the outcome.
    pub async fn run_once(&self, target: &str) -> Result<RunOutcome> {
        if !self.request.cases_path.exists() {
            return Err(Error::CasesPathNotFound(self.request.cases_path.clone()));
        }

        let config = RunConfiguration::resolve(
            self.request.mode,
            self.request.yaml_path.as_deref(),
            self.request.options.as_ref(),
        )?;

        let args = self.runner_args(target);

        let mut cmd = Command::new(&self.runner_bin);
        cmd.args(&args)
            .envs(config.iter())
            .env(BROWSER_KEY, target);

        info!(
            browser = %target,
            runner = %self.runner_bin.display(),
            "invoking runner"
        );

        let started = Instant::now();
        let exit_code = match cmd.status().await {
            Ok(status) => {
                if !status.success() {
                    warn!(browser = %target, code = ?status.code(), "runner exited non-zero");
                }
                status.code()
            }
            Err(err) => {
                warn!(browser = %target, error = %err, "failed to spawn runner");
                None
            }
        };

        Ok(RunOutcome {
            target: target.to_string(),
            exit_code,
            duration: started.elapsed(),
        })
    }

    /// Run the suite for every target in request order.
    ///
    /// The target name is printed before each invocation. No target is
    /// retried or skipped because an earlier runner failed; a validation
    /// error on any iteration propagates and aborts the rest.
    pub async fn run_all(&self) -> Result<Vec<RunOutcome>> {
        let mut outcomes = Vec::with_capacity(self.request.targets.len());
        for target in &self.request.targets {
            println!("{}", target.cyan().bold());
            outcomes.push(self.run_once(target).await?);
        }
        Ok(outcomes)
    }

    /// Argument vector for one invocation: `run <cases> -t <tag>`, plus the
    /// result directory when a results root was supplied.
    fn runner_args(&self, target: &str) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            self.request.cases_path.display().to_string(),
            "-t".to_string(),
            self.request.tag.clone(),
        ];

        if let Some(root) = &self.request.results_root {
            args.push("--job-results-dir".to_string());
            args.push(derive_result_dir(root, target).display().to_string());
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(targets: &[&str], results_root: Option<PathBuf>) -> ExecutionRequest {
        ExecutionRequest {
            cases_path: PathBuf::from("/suite/cases"),
            mode: ExecutionMode::Options,
            yaml_path: None,
            options: Some(
                [("GUEST".to_string(), "vm-01".to_string())]
                    .into_iter()
                    .collect(),
            ),
            results_root,
            tag: "machines".to_string(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn target_list_splits_on_whitespace() {
        assert_eq!(parse_target_list("safari opera"), vec!["safari", "opera"]);
        assert_eq!(
            parse_target_list("  chrome \t firefox  "),
            vec!["chrome", "firefox"]
        );
        assert_eq!(parse_target_list("chrome"), vec!["chrome"]);
    }

    #[test]
    fn default_targets_keep_order() {
        assert_eq!(DEFAULT_TARGETS, ["chrome", "firefox", "edge"]);
    }

    #[test]
    fn result_dir_uses_target_name() {
        let dir = derive_result_dir(Path::new("/tmp/res"), "chrome");
        assert_eq!(dir, PathBuf::from("/tmp/res/chrome"));
    }

    #[test]
    fn result_dir_falls_back_to_hex_token() {
        let dir = derive_result_dir(Path::new("/tmp/res"), "");
        let token = dir.file_name().unwrap().to_str().unwrap();
        assert_eq!(token.len(), 4);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn runner_args_with_results_root() {
        let runner = SuiteRunner::new(
            request(&["chrome"], Some(PathBuf::from("/tmp/res"))),
            PathBuf::from("avocado"),
        );
        assert_eq!(
            runner.runner_args("chrome"),
            vec![
                "run",
                "/suite/cases",
                "-t",
                "machines",
                "--job-results-dir",
                "/tmp/res/chrome",
            ]
        );
    }

    #[test]
    fn runner_args_without_results_root() {
        let runner = SuiteRunner::new(request(&["chrome"], None), PathBuf::from("avocado"));
        let args = runner.runner_args("chrome");
        assert_eq!(args, vec!["run", "/suite/cases", "-t", "machines"]);
        assert!(!args.iter().any(|a| a == "--job-results-dir"));
    }

    #[tokio::test]
    async fn run_once_rejects_missing_cases_path() {
        let runner = SuiteRunner::new(request(&["chrome"], None), PathBuf::from("avocado"));
        let err = runner.run_once("chrome").await.unwrap_err();
        assert!(matches!(err, Error::CasesPathNotFound(_)));
    }

    #[tokio::test]
    async fn run_once_propagates_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let cases = dir.path().join("cases");
        std::fs::write(&cases, "").unwrap();

        let mut req = request(&["chrome"], None);
        req.cases_path = cases;
        req.options = None;

        let runner = SuiteRunner::new(req, PathBuf::from("avocado"));
        let err = runner.run_once("chrome").await.unwrap_err();
        assert!(matches!(err, Error::OptionsNotSet));
    }
}
