use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{arg} must be greater than 0, got: {value}")]
    ZeroValue { arg: String, value: usize },

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] viirscat::Error),
}
