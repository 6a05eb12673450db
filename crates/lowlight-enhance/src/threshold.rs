//! Per-channel binarization
//!
//! Each color channel is thresholded independently and the binary maps are
//! recombined in the original channel order, so the output holds only two
//! values (0 and `max_value`) per channel.
//!
//! Three methods, selected by a closed enum rather than a mode string:
//! locally adaptive (Gaussian-weighted neighborhood mean minus a
//! constant), Otsu's global threshold, and a fixed threshold at 127.

use crate::{EnhanceError, EnhanceResult};
use lowlight_core::{Channels, Histogram, Image};

/// Threshold selection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMethod {
    /// Per-pixel threshold from the Gaussian-weighted neighborhood mean.
    #[default]
    Adaptive,
    /// Global threshold maximizing inter-class variance.
    Otsu,
    /// Fixed threshold at 127.
    Binary,
}

/// Options for per-channel thresholding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOptions {
    /// Threshold selection method.
    pub method: ThresholdMethod,
    /// Side of the square neighborhood for [`ThresholdMethod::Adaptive`];
    /// must be odd and >= 3.
    pub block_size: u32,
    /// Constant subtracted from the local mean.
    pub c: f32,
    /// Output value for samples above the threshold.
    pub max_value: u8,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            method: ThresholdMethod::Adaptive,
            block_size: 11,
            c: 2.0,
            max_value: 255,
        }
    }
}

/// Binarize every channel of an image independently.
///
/// An even or too-small `block_size` is rejected, not silently corrected.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidParameter`] if
/// [`ThresholdMethod::Adaptive`] is selected with a `block_size` that is
/// even or < 3.
pub fn threshold(image: &Image, options: &ThresholdOptions) -> EnhanceResult<Image> {
    if options.method == ThresholdMethod::Adaptive
        && (options.block_size < 3 || options.block_size % 2 == 0)
    {
        return Err(EnhanceError::InvalidParameter(format!(
            "block_size must be odd and >= 3, got {}",
            options.block_size
        )));
    }

    let planes = image.split_channels();
    let binary: Vec<Image> = planes
        .iter()
        .map(|plane| threshold_plane(plane, options))
        .collect();
    Ok(Image::merge_channels(&binary)?)
}

/// Compute Otsu's threshold from a channel histogram.
///
/// Returns the level maximizing the inter-class variance between the
/// below-threshold and above-threshold populations. An empty or
/// single-level histogram yields the midpoint 128.
pub fn otsu_level(histogram: &Histogram) -> u8 {
    let total = histogram.total();
    if total == 0 {
        return 128;
    }

    let mut sum_total = 0.0f64;
    for (i, &count) in histogram.counts().iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_background = 0.0f64;
    let mut weight_background = 0u64;
    let mut best_variance = 0.0f64;
    let mut best_level = 128u8;

    for (t, &count) in histogram.counts().iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += t as f64 * count as f64;
        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;
        let diff = mean_background - mean_foreground;
        let variance = weight_background as f64 * weight_foreground as f64 * diff * diff;

        if variance > best_variance {
            best_variance = variance;
            best_level = t as u8;
        }
    }

    best_level
}

fn threshold_plane(plane: &Image, options: &ThresholdOptions) -> Image {
    match options.method {
        ThresholdMethod::Adaptive => adaptive_plane(plane, options),
        ThresholdMethod::Otsu => {
            let level = otsu_level(&Histogram::from_samples(plane.data()));
            fixed_plane(plane, level, options.max_value)
        }
        ThresholdMethod::Binary => fixed_plane(plane, 127, options.max_value),
    }
}

fn fixed_plane(plane: &Image, level: u8, max_value: u8) -> Image {
    let mut out = plane.clone();
    for v in out.data_mut() {
        *v = if *v > level { max_value } else { 0 };
    }
    out
}

fn adaptive_plane(plane: &Image, options: &ThresholdOptions) -> Image {
    let width = plane.width() as usize;
    let height = plane.height() as usize;
    let kernel = gaussian_kernel(options.block_size as usize);
    let mean = gaussian_blur(plane.data(), width, height, &kernel);

    let mut out = plane.clone();
    for (v, &m) in out.data_mut().iter_mut().zip(&mean) {
        *v = if (*v as f32) > m - options.c {
            options.max_value
        } else {
            0
        };
    }
    out
}

/// Normalized 1-D Gaussian kernel for a given odd size.
///
/// Sigma follows the usual size-derived formula
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size - 1) as f32 * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-d * d / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Separable Gaussian-weighted mean with replicated borders.
fn gaussian_blur(data: &[u8], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let radius = kernel.len() / 2;
    let mut horizontal = vec![0.0f32; width * height];
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x + k).saturating_sub(radius).min(width - 1);
                acc += weight * row[sx] as f32;
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y + k).saturating_sub(radius).min(height - 1);
                acc += weight * horizontal[sy * width + x];
            }
            out[y * width + x] = acc;
        }
    }
    out
}
