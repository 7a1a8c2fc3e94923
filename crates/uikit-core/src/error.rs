//! Fatal error taxonomy for the install flow
//!
//! Only these conditions abort a command. Network failures, skipped writes and
//! failed package installs are absorbed where they happen and never reach here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// No project configuration file at the project root
    #[error("No {file} file found at {}. Please run 'php-ui init' first.", root.display())]
    ConfigMissing { root: PathBuf, file: String },

    /// Configuration file exists but cannot be parsed
    #[error("Invalid configuration in {}: {reason}", path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Component could not be resolved from the selected source
    #[error("Failed to fetch component '{name}' from {origin}")]
    NotFound { name: String, origin: String },

    /// Every file was skipped or failed, so nothing was installed
    #[error("Could not generate files for component: {0}. Check if stubs exist or if the operation was cancelled.")]
    NothingWritten(String),

    /// A registry or repository install was requested without a component name
    #[error("Component name is required when using {0}")]
    NameRequired(&'static str),

    /// A `--url` or `--repo` value that cannot be interpreted
    #[error("Invalid source '{value}': {reason}")]
    InvalidSource { value: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
