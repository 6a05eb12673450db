//! Error types for lowlight-enhance

use thiserror::Error;

/// Errors that can occur during an enhancement transform
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lowlight_core::CoreError),

    /// Invalid transform parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Transform requires a different channel layout
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch {
        /// Expected channel layout description
        expected: &'static str,
        /// Actual channel count
        actual: u32,
    },
}

/// Result type for enhancement operations
pub type EnhanceResult<T> = Result<T, EnhanceError>;
