//! Error types for the suite CLI
//!
//! Every validation failure is raised before an external runner process is
//! spawned for that run; runner failures themselves are recorded in the
//! per-target outcome and never surface here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the suite CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("unsupported execution mode '{0}', expected 'options' or 'file'")]
    UnsupportedMode(String),

    #[error("a config file path must be set for file mode")]
    ConfigPathNotSet,

    #[error("config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("options must be set for options mode")]
    OptionsNotSet,

    #[error("GUEST must be set in the run configuration")]
    GuestNotSet,

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Orchestrator Errors ===
    #[error("cases path not found: {}", .0.display())]
    CasesPathNotFound(PathBuf),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
