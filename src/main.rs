//! Suite CLI - configuration-driven test-suite orchestration
//!
//! Validates a YAML run configuration and invokes the external test runner
//! once per browser target, collecting per-target outcomes.

use clap::Parser;
use suite::{cli, common};

#[tokio::main]
async fn main() {
    common::logging::init_cli();

    let args = cli::Cli::parse();

    if let Err(e) = cli::run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
