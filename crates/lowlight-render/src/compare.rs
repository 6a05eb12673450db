//! Panel composition for comparison figures
//!
//! Panels are pasted onto a white canvas with uniform margins, left to
//! right (or top to bottom), each centered on the cross axis. No resizing
//! is performed; panels keep their pixel dimensions.

use crate::{RenderError, RenderResult};
use image::{Rgb, RgbImage};
use lowlight_core::Image;
use lowlight_io::{from_rgb_buffer, to_rgb_buffer};

/// Gap between panels and around the canvas edge, in pixels.
pub const MARGIN: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Compose panels side by side into one figure.
///
/// # Errors
///
/// Returns [`RenderError::InvalidParameter`] for an empty panel list.
pub fn comparison_strip(panels: &[&Image]) -> RenderResult<Image> {
    compose(panels, Axis::Horizontal)
}

/// Compose panels top to bottom into one figure.
///
/// # Errors
///
/// Returns [`RenderError::InvalidParameter`] for an empty panel list.
pub fn comparison_column(panels: &[&Image]) -> RenderResult<Image> {
    compose(panels, Axis::Vertical)
}

enum Axis {
    Horizontal,
    Vertical,
}

fn compose(panels: &[&Image], axis: Axis) -> RenderResult<Image> {
    if panels.is_empty() {
        return Err(RenderError::InvalidParameter(
            "comparison figure needs at least one panel".into(),
        ));
    }

    let (width, height) = match axis {
        Axis::Horizontal => (
            panels.iter().map(|p| p.width() + MARGIN).sum::<u32>() + MARGIN,
            panels.iter().map(|p| p.height()).max().unwrap() + 2 * MARGIN,
        ),
        Axis::Vertical => (
            panels.iter().map(|p| p.width()).max().unwrap() + 2 * MARGIN,
            panels.iter().map(|p| p.height() + MARGIN).sum::<u32>() + MARGIN,
        ),
    };

    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    let mut offset = MARGIN;
    for panel in panels {
        let buffer = to_rgb_buffer(panel);
        let (x0, y0) = match axis {
            // Center on the cross axis
            Axis::Horizontal => (offset, MARGIN + (height - 2 * MARGIN - panel.height()) / 2),
            Axis::Vertical => (MARGIN + (width - 2 * MARGIN - panel.width()) / 2, offset),
        };
        image::imageops::overlay(&mut canvas, &buffer, x0 as i64, y0 as i64);
        offset += match axis {
            Axis::Horizontal => panel.width() + MARGIN,
            Axis::Vertical => panel.height() + MARGIN,
        };
    }

    Ok(from_rgb_buffer(canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lowlight_core::Channels;

    #[test]
    fn test_strip_geometry_four_panels() {
        let panel = Image::new(50, 40, Channels::Rgb).unwrap();
        let refs: Vec<&Image> = vec![&panel; 4];
        let strip = comparison_strip(&refs).unwrap();
        assert_eq!(strip.width(), 4 * (50 + MARGIN) + MARGIN);
        assert_eq!(strip.height(), 40 + 2 * MARGIN);
    }

    #[test]
    fn test_empty_panel_list_rejected() {
        assert!(matches!(
            comparison_strip(&[]),
            Err(RenderError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_margins_are_white() {
        let mut panel = Image::new(10, 10, Channels::Rgb).unwrap();
        panel.fill(&[0, 0, 0]);
        let strip = comparison_strip(&[&panel]).unwrap();
        assert_eq!(strip.sample(0, 0, 0), 255);
        assert_eq!(strip.sample(MARGIN, MARGIN, 0), 0);
    }

    #[test]
    fn test_column_geometry_mixed_heights() {
        let a = Image::new(30, 20, Channels::Rgb).unwrap();
        let b = Image::new(50, 45, Channels::Gray).unwrap();
        let column = comparison_column(&[&a, &b]).unwrap();
        assert_eq!(column.width(), 50 + 2 * MARGIN);
        assert_eq!(column.height(), 20 + 45 + 3 * MARGIN);
    }
}
