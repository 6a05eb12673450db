//! Power-law (gamma) intensity transform
//!
//! Each sample is normalized to [0, 1], raised to the gamma exponent
//! (constant multiplier fixed at 1) and rescaled to [0, 255]. The whole
//! mapping is precomputed as a 256-entry lookup table and applied per
//! sample.

use crate::{EnhanceError, EnhanceResult};
use lowlight_core::Image;

/// A 256-entry lookup table mapping input samples to output samples.
pub type Lut = [u8; 256];

/// Build the power-law lookup table for `gamma`.
///
/// `lut[i] = ((i/255) ^ gamma) * 255`, computed in f64 and truncated to
/// u8. The input is bounded in [0, 1], so the output needs no clamping.
/// gamma < 1 brightens (expands the dark end), gamma > 1 darkens, and
/// gamma = 1 reproduces every level exactly.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidParameter`] unless `gamma` is finite
/// and > 0.
pub fn gamma_lut(gamma: f64) -> EnhanceResult<Lut> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(EnhanceError::InvalidParameter(format!(
            "gamma must be finite and > 0, got {gamma}"
        )));
    }

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = ((i as f64 / 255.0).powf(gamma) * 255.0) as u8;
    }
    Ok(lut)
}

/// Remap every sample of an image through a lookup table.
///
/// Works on any channel count; channels are remapped independently.
pub fn map_lut(image: &Image, lut: &Lut) -> Image {
    let mut out = image.clone();
    for v in out.data_mut() {
        *v = lut[*v as usize];
    }
    out
}

/// Apply power-law (gamma) correction, returning a new image.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidParameter`] for non-positive or
/// non-finite `gamma`.
pub fn power_law(image: &Image, gamma: f64) -> EnhanceResult<Image> {
    let lut = gamma_lut(gamma)?;
    Ok(map_lut(image, &lut))
}
