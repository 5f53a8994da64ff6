//! Crate-level error type and `Result` alias.
//! Wraps I/O, GDAL and config failures, and provides the semantic variants
//! raised by the projectors (shape, geometry and sample-type mismatches).
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open or create {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: gdal::errors::GdalError,
    },

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Shape mismatch: {what} is {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Geometry mismatch: {0}")]
    GeometryMismatch(String),

    #[error("Unsupported sample type {sample_type} in {path:?}: output must hold NaN")]
    UnsupportedType { path: PathBuf, sample_type: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn open(path: impl Into<PathBuf>, source: gdal::errors::GdalError) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    /// True for the failures the batch tooling reports as I/O errors.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Open { .. })
    }
}
