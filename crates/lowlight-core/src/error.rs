//! Error types for lowlight-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// lowlight-core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid channel count (only 1 and 3 are supported)
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u32),

    /// Pixel buffer length does not match the declared geometry
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Operation requires a different channel count
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch {
        /// Expected channel layout description
        expected: &'static str,
        /// Actual channel count
        actual: u32,
    },

    /// Image dimension mismatch between two images
    #[error("dimension mismatch: {0}x{1} vs {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
