//! lowlight-core - Basic data structures for contrast enhancement
//!
//! This crate provides the types shared by every stage of the lowlight
//! pipeline:
//!
//! - [`Image`] - interleaved 8-bit image, 1 or 3 channels, RGB order
//! - [`Histogram`] / [`Cdf`] - per-channel intensity statistics
//! - [`color`] - RGB ↔ CIE L*a*b* conversion (8-bit quantized)
//! - [`CoreError`] - unified error type for core operations

pub mod color;
pub mod error;
pub mod histogram;
pub mod image;

pub use error::{CoreError, Result};
pub use histogram::{Cdf, Histogram, LEVELS};
pub use image::{Channels, Image};
