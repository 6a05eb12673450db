//! Color space conversion
//!
//! RGB ↔ CIE L*a*b* in the 8-bit quantization used by common imaging
//! libraries: L* is scaled from [0, 100] to [0, 255], a* and b* are offset
//! by +128. The luminance/chrominance split is what the local contrast
//! enhancer operates in.

use crate::error::{CoreError, Result};
use crate::image::{Channels, Image};

// D65 reference white, sRGB primaries.
const XN: f32 = 0.950456;
const ZN: f32 = 1.088754;

/// CIE L*a*b* color, unquantized.
///
/// - `l`: lightness in [0.0, 100.0]
/// - `a`: green-red component, roughly [-128, 127]
/// - `b`: blue-yellow component, roughly [-128, 127]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > 0.008856 {
        t3
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

/// Convert one RGB triple to L*a*b*.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    let rl = srgb_to_linear(r as f32 / 255.0);
    let gl = srgb_to_linear(g as f32 / 255.0);
    let bl = srgb_to_linear(b as f32 / 255.0);

    let x = (0.412453 * rl + 0.357580 * gl + 0.180423 * bl) / XN;
    let y = 0.212671 * rl + 0.715160 * gl + 0.072169 * bl;
    let z = (0.019334 * rl + 0.119193 * gl + 0.950227 * bl) / ZN;

    let fy = lab_f(y);
    Lab {
        l: if y > 0.008856 {
            116.0 * y.cbrt() - 16.0
        } else {
            903.3 * y
        },
        a: 500.0 * (lab_f(x) - fy),
        b: 200.0 * (fy - lab_f(z)),
    }
}

/// Convert one L*a*b* color back to RGB.
pub fn lab_to_rgb(lab: Lab) -> (u8, u8, u8) {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * XN;
    let y = if lab.l > 7.9996 {
        fy * fy * fy
    } else {
        lab.l / 903.3
    };
    let z = lab_f_inv(fz) * ZN;

    let rl = 3.240479 * x - 1.537150 * y - 0.498535 * z;
    let gl = -0.969256 * x + 1.875992 * y + 0.041556 * z;
    let bl = 0.055648 * x - 0.204043 * y + 1.057311 * z;

    let to_u8 = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0 + 0.5) as u8;
    (to_u8(rl), to_u8(gl), to_u8(bl))
}

/// Quantize L*a*b* to three bytes: `(L*255/100, a+128, b+128)`.
#[inline]
pub fn lab_to_bytes(lab: Lab) -> (u8, u8, u8) {
    let l = (lab.l * 255.0 / 100.0 + 0.5).clamp(0.0, 255.0) as u8;
    let a = (lab.a + 128.0 + 0.5).clamp(0.0, 255.0) as u8;
    let b = (lab.b + 128.0 + 0.5).clamp(0.0, 255.0) as u8;
    (l, a, b)
}

/// Dequantize three bytes back to L*a*b*.
#[inline]
pub fn bytes_to_lab(l: u8, a: u8, b: u8) -> Lab {
    Lab {
        l: l as f32 * 100.0 / 255.0,
        a: a as f32 - 128.0,
        b: b as f32 - 128.0,
    }
}

/// Convert an RGB image to a 3-channel image holding quantized L*, a*, b*.
///
/// # Errors
///
/// Returns [`CoreError::ChannelMismatch`] for non-RGB input.
pub fn image_rgb_to_lab(image: &Image) -> Result<Image> {
    if image.channels() != Channels::Rgb {
        return Err(CoreError::ChannelMismatch {
            expected: "3-channel RGB",
            actual: image.channel_count(),
        });
    }

    let mut data = Vec::with_capacity(image.data().len());
    for px in image.data().chunks_exact(3) {
        let (l, a, b) = lab_to_bytes(rgb_to_lab(px[0], px[1], px[2]));
        data.extend_from_slice(&[l, a, b]);
    }
    Image::from_raw(image.width(), image.height(), Channels::Rgb, data)
}

/// Convert a quantized L*a*b* image back to RGB.
///
/// # Errors
///
/// Returns [`CoreError::ChannelMismatch`] for non-3-channel input.
pub fn image_lab_to_rgb(image: &Image) -> Result<Image> {
    if image.channels() != Channels::Rgb {
        return Err(CoreError::ChannelMismatch {
            expected: "3-channel L*a*b*",
            actual: image.channel_count(),
        });
    }

    let mut data = Vec::with_capacity(image.data().len());
    for px in image.data().chunks_exact(3) {
        let (r, g, b) = lab_to_rgb(bytes_to_lab(px[0], px[1], px[2]));
        data.extend_from_slice(&[r, g, b]);
    }
    Image::from_raw(image.width(), image.height(), Channels::Rgb, data)
}
