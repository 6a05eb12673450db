//! CLAHE pipeline properties
//!
//! The public transform must equal the composed pipeline (Lab conversion,
//! L-plane equalization, merge with the untouched chrominance planes,
//! inverse conversion), which pins down that a*/b* pass through exactly.

use lowlight_core::color::{image_lab_to_rgb, image_rgb_to_lab};
use lowlight_core::{Channels, Image};
use lowlight_enhance::{ClaheOptions, clahe, clahe_plane};

/// Low-light-looking test image: dark with a bright window
fn dark_scene(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height, Channels::Rgb).unwrap();
    for y in 0..height {
        for x in 0..width {
            let bright = x > width / 2 && y > height / 2;
            let base = if bright { 180 } else { 25 };
            img.set_sample(x, y, 0, base);
            img.set_sample(x, y, 1, base.saturating_sub(5));
            img.set_sample(x, y, 2, base.saturating_add(10).min(255));
        }
    }
    img
}

#[test]
fn test_dimensions_and_channels_preserved() {
    let img = dark_scene(100, 75);
    let out = clahe(&img, &ClaheOptions::default()).unwrap();
    assert_eq!(out.width(), 100);
    assert_eq!(out.height(), 75);
    assert_eq!(out.channels(), Channels::Rgb);
}

#[test]
fn test_chrominance_passes_through_unchanged() {
    let img = dark_scene(64, 64);
    let options = ClaheOptions::default();

    // Hand-composed pipeline with the chrominance planes reused verbatim
    let lab = image_rgb_to_lab(&img).unwrap();
    let planes = lab.split_channels();
    let equalized = clahe_plane(&planes[0], &options).unwrap();
    let merged =
        Image::merge_channels(&[equalized, planes[1].clone(), planes[2].clone()]).unwrap();
    let expected = image_lab_to_rgb(&merged).unwrap();

    assert_eq!(clahe(&img, &options).unwrap(), expected);
}

#[test]
fn test_raises_contrast_of_flat_dark_regions() {
    let img = dark_scene(64, 64);
    let out = clahe(&img, &ClaheOptions::default()).unwrap();

    let spread = |i: &Image| {
        let gray = i.to_gray();
        let min = *gray.data().iter().min().unwrap() as i32;
        let max = *gray.data().iter().max().unwrap() as i32;
        max - min
    };
    assert!(spread(&out) >= spread(&img));
}

#[test]
fn test_input_not_mutated() {
    let img = dark_scene(48, 48);
    let before = img.clone();
    let _ = clahe(&img, &ClaheOptions::default()).unwrap();
    assert_eq!(img, before);
}
