//! lowlight - Contrast enhancement for low-light photographs
//!
//! Batch-applies three classical contrast transforms to a folder of
//! images and renders comparison figures:
//!
//! - Power-law (gamma) correction
//! - Contrast-limited adaptive histogram equalization (L* plane only)
//! - Per-channel adaptive/Otsu/fixed thresholding
//!
//! # Example
//!
//! ```
//! use lowlight::{Channels, Image};
//! use lowlight::enhance::power_law;
//!
//! let mut image = Image::new(64, 64, Channels::Rgb).unwrap();
//! image.fill(&[30, 40, 50]);
//! let brightened = power_law(&image, 0.5).unwrap();
//! assert_eq!(brightened.width(), 64);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use lowlight_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use lowlight_enhance as enhance;
pub use lowlight_io as io;
pub use lowlight_render as render;
