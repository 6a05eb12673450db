//! Error types for lowlight-render

use thiserror::Error;

/// Errors that can occur while composing figures
#[derive(Debug, Error)]
pub enum RenderError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lowlight_core::CoreError),

    /// Invalid figure parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
