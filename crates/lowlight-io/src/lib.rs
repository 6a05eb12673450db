//! lowlight-io - Image file I/O
//!
//! Decoding and encoding of JPEG, PNG and BMP files via the `image` crate,
//! plus the conversions between [`lowlight_core::Image`] and the `image`
//! crate's buffer types used by the rendering layer.
//!
//! Loaded images are always normalized to 3-channel RGB; the rest of the
//! pipeline assumes color input the way the batch pipeline does.

mod error;

pub use error::{IoError, IoResult};

use image::{DynamicImage, GrayImage, ImageError, RgbImage};
use lowlight_core::{Channels, Image};
use std::io::ErrorKind;
use std::path::Path;

/// File extensions the batch scanner accepts, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Check whether a path carries a supported extension, case-insensitive.
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Read and decode an image file into a 3-channel RGB [`Image`].
///
/// # Errors
///
/// [`IoError::NotFound`] if the file is missing or unreadable,
/// [`IoError::Decode`] if it exists but cannot be decoded.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) if io.kind() == ErrorKind::NotFound => {
            IoError::NotFound(path.to_path_buf())
        }
        other => IoError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;
    Ok(from_dynamic(decoded))
}

/// Encode an [`Image`] to the format implied by the path's extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for extensions outside
/// [`SUPPORTED_EXTENSIONS`], [`IoError::Encode`] on encoder failure.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    if !has_supported_extension(path) {
        return Err(IoError::UnsupportedFormat(path.display().to_string()));
    }

    let result = match image.channels() {
        Channels::Rgb => to_rgb_buffer(image).save(path),
        Channels::Gray => to_gray_buffer(image).save(path),
    };
    result.map_err(|e| IoError::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Convert a decoded `DynamicImage` to a 3-channel RGB [`Image`].
pub fn from_dynamic(decoded: DynamicImage) -> Image {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Image::from_raw(width, height, Channels::Rgb, rgb.into_raw())
        .expect("decoder produced a consistent buffer")
}

/// Convert an [`Image`] to an `image::RgbImage`.
///
/// Grayscale input is replicated across the three channels.
pub fn to_rgb_buffer(image: &Image) -> RgbImage {
    let data = match image.channels() {
        Channels::Rgb => image.data().to_vec(),
        Channels::Gray => image.data().iter().flat_map(|&v| [v, v, v]).collect(),
    };
    RgbImage::from_raw(image.width(), image.height(), data)
        .expect("image invariant guarantees buffer size")
}

/// Convert a single-channel [`Image`] to an `image::GrayImage`.
///
/// Multi-channel input is reduced with BT.601 weights first.
pub fn to_gray_buffer(image: &Image) -> GrayImage {
    let gray = image.to_gray();
    let (width, height) = (gray.width(), gray.height());
    GrayImage::from_raw(width, height, gray.into_raw())
        .expect("image invariant guarantees buffer size")
}

/// Convert an `image::RgbImage` back to an [`Image`].
pub fn from_rgb_buffer(buffer: RgbImage) -> Image {
    let (width, height) = buffer.dimensions();
    Image::from_raw(width, height, Channels::Rgb, buffer.into_raw())
        .expect("image invariant guarantees buffer size")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lowlight-io-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_supported_extensions_case_insensitive() {
        assert!(has_supported_extension(Path::new("a.jpg")));
        assert!(has_supported_extension(Path::new("a.JPEG")));
        assert!(has_supported_extension(Path::new("a.Png")));
        assert!(has_supported_extension(Path::new("a.BMP")));
        assert!(!has_supported_extension(Path::new("a.tiff")));
        assert!(!has_supported_extension(Path::new("noext")));
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let err = read_image("/nonexistent/dir/missing.png").unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }

    #[test]
    fn test_read_garbage_is_decode_error() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"this is not a png").unwrap();
        let err = read_image(&path).unwrap_err();
        assert!(matches!(err, IoError::Decode { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_unsupported_extension() {
        let img = Image::new(2, 2, Channels::Rgb).unwrap();
        let err = write_image(&img, temp_path("out.webp")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_png_write_read_roundtrip() {
        let mut img = Image::new(8, 6, Channels::Rgb).unwrap();
        img.fill(&[10, 200, 77]);
        let path = temp_path("roundtrip.png");
        write_image(&img, &path).unwrap();
        let back = read_image(&path).unwrap();
        assert_eq!(back.width(), 8);
        assert_eq!(back.height(), 6);
        assert_eq!(back.channels(), Channels::Rgb);
        // PNG is lossless
        assert_eq!(back.data(), img.data());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_gray_buffer_replication() {
        let mut img = Image::new(2, 1, Channels::Gray).unwrap();
        img.data_mut().copy_from_slice(&[9, 200]);
        let rgb = to_rgb_buffer(&img);
        assert_eq!(rgb.get_pixel(0, 0).0, [9, 9, 9]);
        assert_eq!(rgb.get_pixel(1, 0).0, [200, 200, 200]);
    }
}
