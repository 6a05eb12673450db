//! Error types for lowlight-io
//!
//! A missing file and an undecodable file are distinct failures: the batch
//! orchestrator reports them differently but skips the item either way.

use std::path::PathBuf;
use thiserror::Error;

/// lowlight-io error type
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist or is not readable
    #[error("image not found: {0}")]
    NotFound(PathBuf),

    /// File exists but could not be decoded
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image could not be encoded or written
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Extension is not in the supported set
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;
