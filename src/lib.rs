//! Suite CLI - configuration-driven test-suite orchestration
//!
//! Validates a run configuration, projects it into per-invocation child
//! environments, and invokes an external test-execution tool once per
//! browser target.

pub mod cli;
pub mod common;
pub mod exec;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use exec::{ExecutionMode, ExecutionRequest, RunConfiguration, RunOutcome, SuiteRunner};
