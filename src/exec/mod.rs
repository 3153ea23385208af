//! Suite execution core
//!
//! `config` resolves and validates the run configuration; `runner` expands
//! it into one external-runner invocation per browser target.

pub mod config;
pub mod runner;

pub use config::{ExecutionMode, RunConfiguration};
pub use runner::{ExecutionRequest, RunOutcome, SuiteRunner};
