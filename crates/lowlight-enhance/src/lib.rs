//! lowlight-enhance - Contrast enhancement transforms
//!
//! The three transforms the batch pipeline applies to every image:
//!
//! - Power-law (gamma) correction via a 256-entry lookup table
//! - Contrast-limited adaptive histogram equalization on the L* plane
//! - Per-channel binarization (adaptive / Otsu / fixed)
//!
//! All transforms take `&Image` and return a new image; parameters are
//! immutable per call and validated up front.

pub mod clahe;
mod error;
pub mod gamma;
pub mod threshold;

pub use error::{EnhanceError, EnhanceResult};

// Re-export the transform entry points
pub use clahe::{ClaheOptions, clahe, clahe_plane};
pub use gamma::{Lut, gamma_lut, map_lut, power_law};
pub use threshold::{ThresholdMethod, ThresholdOptions, otsu_level, threshold};
