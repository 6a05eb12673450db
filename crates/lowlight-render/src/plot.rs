//! Histogram/CDF plot rasterization
//!
//! Renders a channel histogram as gray bars with the cumulative
//! distribution overlaid as a red polyline, the CDF scaled to the
//! histogram peak so both fit one vertical axis (a presentation choice,
//! not a semantic transform).

use crate::{RenderError, RenderResult};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use imageproc::rect::Rect;
use lowlight_core::{Cdf, Histogram, Image, LEVELS};
use lowlight_io::from_rgb_buffer;

/// Plot canvas width in pixels.
pub const PLOT_WIDTH: u32 = 576;
/// Plot canvas height in pixels.
pub const PLOT_HEIGHT: u32 = 360;

const MARGIN_LEFT: u32 = 32;
const MARGIN_RIGHT: u32 = 32;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 28;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const BARS: Rgb<u8> = Rgb([160, 160, 160]);
const CDF_LINE: Rgb<u8> = Rgb([220, 40, 40]);

/// Render one histogram with its CDF overlay.
///
/// The CDF must belong to the histogram (same totals); the pair is what
/// [`lowlight_core::Cdf::of`] produces.
///
/// # Errors
///
/// Returns [`RenderError::InvalidParameter`] if the CDF total does not
/// match the histogram total.
pub fn plot_histogram(histogram: &Histogram, cdf: &Cdf) -> RenderResult<Image> {
    if cdf.total() != histogram.total() {
        return Err(RenderError::InvalidParameter(
            "cdf does not belong to this histogram".into(),
        ));
    }

    let mut canvas = RgbImage::from_pixel(PLOT_WIDTH, PLOT_HEIGHT, BACKGROUND);

    let area_w = (PLOT_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f32;
    let area_h = (PLOT_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f32;
    let bottom = (PLOT_HEIGHT - MARGIN_BOTTOM) as f32;

    let peak = histogram.peak();
    let x_of = |level: usize| MARGIN_LEFT as f32 + level as f32 / (LEVELS - 1) as f32 * area_w;
    let y_of = |value: f32| bottom - (value / peak.max(1) as f32) * area_h;

    // Histogram bars, scaled to the peak bin
    if peak > 0 {
        for (level, &count) in histogram.counts().iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x = x_of(level).round() as i32;
            let y = y_of(count as f32).round() as i32;
            let h = (bottom as i32 - y).max(1);
            imageproc::drawing::draw_filled_rect_mut(
                &mut canvas,
                Rect::at(x, y).of_size(2, h as u32),
                BARS,
            );
        }
    }

    // CDF polyline, scaled to the histogram peak for the overlay
    let total = cdf.total();
    if total > 0 {
        let scale = peak as f32 / total as f32;
        let mut prev = (x_of(0), y_of(cdf.values()[0] as f32 * scale));
        for (level, &value) in cdf.values().iter().enumerate().skip(1) {
            let next = (x_of(level), y_of(value as f32 * scale));
            draw_line_segment_mut(&mut canvas, prev, next, CDF_LINE);
            prev = next;
        }
    }

    // Axes drawn last so bars do not overpaint them
    draw_line_segment_mut(
        &mut canvas,
        (MARGIN_LEFT as f32, MARGIN_TOP as f32),
        (MARGIN_LEFT as f32, bottom),
        AXIS,
    );
    draw_line_segment_mut(
        &mut canvas,
        (MARGIN_LEFT as f32, bottom),
        ((PLOT_WIDTH - MARGIN_RIGHT) as f32, bottom),
        AXIS,
    );

    Ok(from_rgb_buffer(canvas))
}
