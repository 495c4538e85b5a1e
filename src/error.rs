//! Crate-level error type and `Result` alias.
//! Converts underlying I/O, raster, JSON and timestamp errors, and provides semantic
//! variants for filename, dataset-type and footprint failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Raster access error: {0}")]
    Raster(#[from] crate::io::RasterError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Filename does not follow the VIIRS SDR naming convention: {0}")]
    FilenameMismatch(String),

    #[error("Unknown dataset type '{label}' for VIIRS granule. Valid values are: {valid}")]
    UnknownDatasetType { label: String, valid: String },

    #[error("No valid geolocation rows in swath ({rows}x{cols})")]
    NoValidRows { rows: usize, cols: usize },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}
