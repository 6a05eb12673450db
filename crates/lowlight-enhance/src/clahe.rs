//! Contrast-limited adaptive histogram equalization
//!
//! The image is converted to L*a*b*; the L plane is partitioned into a
//! fixed grid of tiles, each tile gets a clip-limited equalization lookup
//! table, and per-pixel output is bilinearly interpolated between the four
//! surrounding tile tables to avoid blocking artifacts. Chrominance passes
//! through untouched.
//!
//! Matches the standard OpenCV formulation: histogram bins above
//! `clip_limit * tile_area / 256` are clipped with the excess
//! redistributed, and images whose dimensions are not divisible by the
//! grid are virtually extended by reflect-101 for table computation.

use crate::{EnhanceError, EnhanceResult};
use lowlight_core::color::{image_lab_to_rgb, image_rgb_to_lab};
use lowlight_core::{Channels, Image};

/// Tiling and clipping parameters for CLAHE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheOptions {
    /// Contrast clip limit, as a multiple of the uniform bin height.
    pub clip_limit: f32,
    /// Number of tile columns.
    pub grid_x: u32,
    /// Number of tile rows.
    pub grid_y: u32,
}

impl Default for ClaheOptions {
    fn default() -> Self {
        Self {
            clip_limit: 3.0,
            grid_x: 8,
            grid_y: 8,
        }
    }
}

impl ClaheOptions {
    fn validate(&self) -> EnhanceResult<()> {
        if !self.clip_limit.is_finite() || self.clip_limit <= 0.0 {
            return Err(EnhanceError::InvalidParameter(format!(
                "clip_limit must be finite and > 0, got {}",
                self.clip_limit
            )));
        }
        if self.grid_x == 0 || self.grid_y == 0 {
            return Err(EnhanceError::InvalidParameter(
                "tile grid dimensions must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Enhance local contrast of a 3-channel RGB image.
///
/// Only the L* plane is equalized; a*/b* are carried through bit-for-bit
/// before the inverse color conversion.
///
/// # Errors
///
/// [`EnhanceError::ChannelMismatch`] for non-RGB input,
/// [`EnhanceError::InvalidParameter`] for bad options.
pub fn clahe(image: &Image, options: &ClaheOptions) -> EnhanceResult<Image> {
    if image.channels() != Channels::Rgb {
        return Err(EnhanceError::ChannelMismatch {
            expected: "3-channel RGB",
            actual: image.channel_count(),
        });
    }
    options.validate()?;

    let lab = image_rgb_to_lab(image)?;
    let planes = lab.split_channels();
    let equalized = clahe_plane(&planes[0], options)?;
    let merged = Image::merge_channels(&[equalized, planes[1].clone(), planes[2].clone()])?;
    Ok(image_lab_to_rgb(&merged)?)
}

/// Equalize a single grayscale plane with clip-limited tiles.
///
/// # Errors
///
/// [`EnhanceError::ChannelMismatch`] for multi-channel input,
/// [`EnhanceError::InvalidParameter`] for bad options.
pub fn clahe_plane(plane: &Image, options: &ClaheOptions) -> EnhanceResult<Image> {
    if plane.channels() != Channels::Gray {
        return Err(EnhanceError::ChannelMismatch {
            expected: "single channel",
            actual: plane.channel_count(),
        });
    }
    options.validate()?;

    let width = plane.width() as usize;
    let height = plane.height() as usize;
    let grid_x = options.grid_x as usize;
    let grid_y = options.grid_y as usize;

    // Tile size over the virtually extended image (reflect-101 padding so
    // each dimension becomes divisible by the grid).
    let ext_width = width.div_ceil(grid_x) * grid_x;
    let ext_height = height.div_ceil(grid_y) * grid_y;
    let tile_width = ext_width / grid_x;
    let tile_height = ext_height / grid_y;

    let luts = compute_tile_luts(
        plane.data(),
        width,
        height,
        grid_x,
        grid_y,
        tile_width,
        tile_height,
        options.clip_limit,
    );

    let mut out = plane.clone();
    interpolate(
        plane.data(),
        out.data_mut(),
        width,
        height,
        grid_x,
        grid_y,
        tile_width,
        tile_height,
        &luts,
    );
    Ok(out)
}

/// Reflect-101 coordinate mapping: `..2 1 | 0 1 2 .. n-1 | n-2 n-3 ..`
#[inline]
fn reflect101(i: usize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * len - 2;
    let r = i % period;
    if r >= len { period - r } else { r }
}

#[allow(clippy::too_many_arguments)]
fn compute_tile_luts(
    data: &[u8],
    width: usize,
    height: usize,
    grid_x: usize,
    grid_y: usize,
    tile_width: usize,
    tile_height: usize,
    clip_limit: f32,
) -> Vec<[u8; 256]> {
    let tile_area = tile_width * tile_height;
    // Clip threshold per bin; never below one sample.
    let clip = (((clip_limit * tile_area as f32) / 256.0).floor() as usize).max(1);

    let mut luts = vec![[0u8; 256]; grid_x * grid_y];
    for ty in 0..grid_y {
        for tx in 0..grid_x {
            let mut hist = [0usize; 256];
            for y in (ty * tile_height)..((ty + 1) * tile_height) {
                let sy = reflect101(y, height);
                let row = &data[sy * width..(sy + 1) * width];
                for x in (tx * tile_width)..((tx + 1) * tile_width) {
                    hist[row[reflect101(x, width)] as usize] += 1;
                }
            }

            // Clip and redistribute the excess uniformly, then spread the
            // remainder over evenly spaced bins.
            let mut excess = 0usize;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let batch = excess / 256;
            let mut residual = excess % 256;
            for bin in hist.iter_mut() {
                *bin += batch;
            }
            if residual > 0 {
                let step = (256 / residual).max(1);
                let mut i = 0;
                while i < 256 && residual > 0 {
                    hist[i] += 1;
                    residual -= 1;
                    i += step;
                }
            }

            // Cumulative mapping scaled to the full intensity range.
            let scale = 255.0_f32 / tile_area as f32;
            let lut = &mut luts[ty * grid_x + tx];
            let mut cumulative = 0usize;
            for (i, &count) in hist.iter().enumerate() {
                cumulative += count;
                lut[i] = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    luts
}

#[allow(clippy::too_many_arguments)]
fn interpolate(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    grid_x: usize,
    grid_y: usize,
    tile_width: usize,
    tile_height: usize,
    luts: &[[u8; 256]],
) {
    let inv_tw = 1.0_f32 / tile_width as f32;
    let inv_th = 1.0_f32 / tile_height as f32;

    for y in 0..height {
        // Fractional tile coordinate, offset so tile centers are the knots.
        // Both neighbor indices derive from the unclamped floor and are
        // clamped independently, so in the half-tile border regions they
        // collapse onto the edge tile instead of blending its neighbor in.
        let tyf = y as f32 * inv_th - 0.5;
        let tyi = tyf.floor() as isize;
        let wy = tyf - tyi as f32;
        let ty0 = tyi.clamp(0, grid_y as isize - 1) as usize;
        let ty1 = (tyi + 1).clamp(0, grid_y as isize - 1) as usize;

        for x in 0..width {
            let txf = x as f32 * inv_tw - 0.5;
            let txi = txf.floor() as isize;
            let wx = txf - txi as f32;
            let tx0 = txi.clamp(0, grid_x as isize - 1) as usize;
            let tx1 = (txi + 1).clamp(0, grid_x as isize - 1) as usize;

            let v = src[y * width + x] as usize;
            let tl = luts[ty0 * grid_x + tx0][v] as f32;
            let tr = luts[ty0 * grid_x + tx1][v] as f32;
            let bl = luts[ty1 * grid_x + tx0][v] as f32;
            let br = luts[ty1 * grid_x + tx1][v] as f32;

            let top = tl + wx * (tr - tl);
            let bottom = bl + wx * (br - bl);
            dst[y * width + x] = (top + wy * (bottom - top)).round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_plane(width: u32, height: u32) -> Image {
        let mut img = Image::new(width, height, Channels::Gray).unwrap();
        for y in 0..height {
            for x in 0..width {
                img.set_sample(x, y, 0, ((x * 2 + y) % 256) as u8);
            }
        }
        img
    }

    #[test]
    fn test_reflect101_indexing() {
        assert_eq!(reflect101(0, 5), 0);
        assert_eq!(reflect101(4, 5), 4);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 1), 0);
    }

    #[test]
    fn test_plane_dimensions_preserved() {
        // 100 is not divisible by 8: exercises the reflect-101 extension
        let plane = gradient_plane(100, 60);
        let out = clahe_plane(&plane, &ClaheOptions::default()).unwrap();
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 60);
        assert_eq!(out.channels(), Channels::Gray);
    }

    #[test]
    fn test_uniform_plane_stays_uniform() {
        let mut plane = Image::new(64, 64, Channels::Gray).unwrap();
        plane.fill(&[90]);
        let out = clahe_plane(&plane, &ClaheOptions::default()).unwrap();
        let first = out.data()[0];
        assert!(out.data().iter().all(|&v| v == first));
    }

    #[test]
    fn test_rejects_gray_input() {
        let plane = gradient_plane(32, 32);
        let err = clahe(&plane, &ClaheOptions::default()).unwrap_err();
        assert!(matches!(err, EnhanceError::ChannelMismatch { .. }));
    }

    #[test]
    fn test_rejects_bad_options() {
        let plane = gradient_plane(32, 32);
        let bad_clip = ClaheOptions {
            clip_limit: 0.0,
            ..Default::default()
        };
        assert!(clahe_plane(&plane, &bad_clip).is_err());
        let bad_grid = ClaheOptions {
            grid_x: 0,
            ..Default::default()
        };
        assert!(clahe_plane(&plane, &bad_grid).is_err());
    }

    #[test]
    fn test_border_pixels_use_edge_tile_only() {
        // Two tiles side by side: left all 50, right all 200, clip limit
        // high enough that neither histogram is clipped. Within half a
        // tile of the left edge both interpolation neighbors must collapse
        // onto tile 0, so its LUT applies unblended: every sample of the
        // left tile sits at the top of that tile's distribution and maps
        // to 255. A blend with the right tile (where 50 maps to 0) would
        // pull the edge column down toward 128.
        let mut plane = Image::new(16, 8, Channels::Gray).unwrap();
        for y in 0..8 {
            for x in 0..16 {
                plane.set_sample(x, y, 0, if x < 8 { 50 } else { 200 });
            }
        }
        let options = ClaheOptions {
            clip_limit: 1000.0,
            grid_x: 2,
            grid_y: 1,
        };
        let out = clahe_plane(&plane, &options).unwrap();
        for y in 0..8 {
            for x in 0..4 {
                assert_eq!(out.sample(x, y, 0), 255, "blended at ({x},{y})");
            }
            assert_eq!(out.sample(15, y, 0), 255, "blended at (15,{y})");
        }
    }

    #[test]
    fn test_single_tile_is_plain_clipped_equalization() {
        // With a 1x1 grid there is nothing to interpolate; the output must
        // be a pure LUT remap, so equal inputs map to equal outputs.
        let plane = gradient_plane(64, 64);
        let options = ClaheOptions {
            clip_limit: 40.0,
            grid_x: 1,
            grid_y: 1,
        };
        let out = clahe_plane(&plane, &options).unwrap();
        let mut mapping = [None::<u8>; 256];
        for (src, dst) in plane.data().iter().zip(out.data()) {
            match mapping[*src as usize] {
                None => mapping[*src as usize] = Some(*dst),
                Some(prev) => assert_eq!(prev, *dst),
            }
        }
    }
}
