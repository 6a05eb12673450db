//! Power-law transform properties
//!
//! - gamma 1.0 is the identity on every level
//! - gamma g followed by 1/g reconstructs the input within rounding

use lowlight_core::{Channels, Image};
use lowlight_enhance::power_law;

/// Image covering every intensity level in every channel
fn full_range_image() -> Image {
    let mut img = Image::new(16, 16, Channels::Rgb).unwrap();
    for (i, v) in img.data_mut().iter_mut().enumerate() {
        *v = (i % 256) as u8;
    }
    img
}

#[test]
fn test_gamma_one_is_identity() {
    let img = full_range_image();
    let out = power_law(&img, 1.0).unwrap();
    assert_eq!(out, img);
}

#[test]
fn test_roundtrip_within_rounding_error() {
    let img = full_range_image();
    for gamma in [0.5, 0.7, 1.5, 2.2] {
        let forward = power_law(&img, gamma).unwrap();
        let back = power_law(&forward, 1.0 / gamma).unwrap();
        let worst = img
            .data()
            .iter()
            .zip(back.data())
            .map(|(&a, &b)| (a as i32 - b as i32).abs())
            .max()
            .unwrap();
        // 8-bit quantization in each direction costs a few levels at most
        assert!(worst <= 4, "gamma {gamma}: worst deviation {worst}");
    }
}

#[test]
fn test_dimensions_and_channels_preserved() {
    let img = full_range_image();
    let out = power_law(&img, 0.5).unwrap();
    assert_eq!(out.width(), img.width());
    assert_eq!(out.height(), img.height());
    assert_eq!(out.channels(), img.channels());
}

#[test]
fn test_brightening_raises_mean() {
    let mut img = Image::new(32, 32, Channels::Rgb).unwrap();
    img.fill(&[40, 60, 80]);
    let out = power_law(&img, 0.5).unwrap();
    let mean = |i: &Image| i.data().iter().map(|&v| v as u64).sum::<u64>() / i.data().len() as u64;
    assert!(mean(&out) > mean(&img));
}
