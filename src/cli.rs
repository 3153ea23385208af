//! CLI argument surface and top-level run glue
//!
//! Assembles an `ExecutionRequest` from the command line and tool settings,
//! drives `SuiteRunner` over every target, and prints the outcome summary.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use crate::common::config::Settings;
use crate::common::Result;
use crate::exec::config::ExecutionMode;
use crate::exec::runner::{
    parse_target_list, ExecutionRequest, RunOutcome, SuiteRunner, DEFAULT_TARGETS,
};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "suite",
    version,
    about = "Run a test suite once per browser target",
    long_about = None
)]
pub struct Cli {
    /// Path to the test cases handed to the external runner
    pub cases_path: PathBuf,

    /// YAML file holding the run configuration (environment mapping)
    pub yaml_path: PathBuf,

    /// Base directory for per-target result directories
    #[arg(short = 'r', long = "result")]
    pub result: Option<PathBuf>,

    /// Tag forwarded to the runner (default: machines)
    #[arg(short = 't', long = "tag")]
    pub tag: Option<String>,

    /// Browser targets as a whitespace-separated list
    /// (default: chrome firefox edge)
    #[arg(short = 'b', long = "browser")]
    pub browser: Option<String>,

    /// Path to the runner binary, overriding config and PATH lookup
    #[arg(long)]
    pub runner: Option<PathBuf>,

    /// Print the outcome summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run every target and report outcomes.
///
/// Validation failures propagate to the caller; per-target runner failures
/// only show up in the summary and never affect the returned result.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;

    let runner_bin = cli.runner.unwrap_or_else(|| settings.runner_bin());

    let targets = match &cli.browser {
        Some(raw) => parse_target_list(raw),
        None => settings
            .defaults
            .targets
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect()),
    };

    let tag = cli.tag.unwrap_or_else(|| settings.defaults.tag.clone());

    debug!(runner = %runner_bin.display(), ?targets, "assembled execution request");

    let request = ExecutionRequest {
        cases_path: cli.cases_path,
        mode: ExecutionMode::File,
        yaml_path: Some(cli.yaml_path),
        options: None,
        results_root: cli.result,
        tag,
        targets,
    };

    let outcomes = SuiteRunner::new(request, runner_bin).run_all().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_summary(&outcomes);
    }

    Ok(())
}

fn print_summary(outcomes: &[RunOutcome]) {
    println!();
    for outcome in outcomes {
        let mark = if outcome.success() {
            "✓".green()
        } else {
            "✗".red()
        };
        let status = match outcome.exit_code {
            Some(code) => format!("exit {code}"),
            None => "did not run".to_string(),
        };
        println!(
            "  {} {} ({}, {:.1?})",
            mark,
            outcome.target.bold(),
            status.dimmed(),
            outcome.duration
        );
    }
}
