//! The main image container
//!
//! [`Image`] holds a rectangular grid of 8-bit samples with 1 (grayscale)
//! or 3 (RGB) interleaved channels.
//!
//! # Channel order
//!
//! Color images are **RGB everywhere**: at load, through every transform,
//! at save, and in rendered figures. Libraries with a BGR-native order must
//! swap at their own boundary; nothing in this workspace ever reinterprets
//! the channel order.
//!
//! # Ownership model
//!
//! Transforms take `&Image` and return a new `Image`; the caller's buffer
//! is never mutated in place.

use crate::error::{CoreError, Result};

/// Channel layout of an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale
    Gray = 1,
    /// Three-channel RGB, red first
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidChannelCount`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(CoreError::InvalidChannelCount(count)),
        }
    }

    /// Number of samples per pixel.
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// An 8-bit image with interleaved samples.
///
/// Invariant: `data.len() == width * height * channels.count()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize * channels.count() as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimensions`] for zero dimensions and
    /// [`CoreError::BufferSize`] if the buffer length does not match.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * channels.count() as usize;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Number of samples per pixel.
    pub fn channel_count(&self) -> u32 {
        self.channels.count()
    }

    /// Borrow the interleaved sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the interleaved sample buffer.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32, c: u32) -> usize {
        ((y as usize * self.width as usize + x as usize) * self.channels.count() as usize)
            + c as usize
    }

    /// Read one sample. Coordinates must be in range.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, c: u32) -> u8 {
        self.data[self.index(x, y, c)]
    }

    /// Write one sample. Coordinates must be in range.
    #[inline]
    pub fn set_sample(&mut self, x: u32, y: u32, c: u32, value: u8) {
        let i = self.index(x, y, c);
        self.data[i] = value;
    }

    /// Split into per-channel grayscale planes, in channel order.
    pub fn split_channels(&self) -> Vec<Image> {
        let n = self.channels.count() as usize;
        let pixels = self.width as usize * self.height as usize;
        let mut planes = vec![Vec::with_capacity(pixels); n];
        for (i, &v) in self.data.iter().enumerate() {
            planes[i % n].push(v);
        }
        planes
            .into_iter()
            .map(|p| Image {
                width: self.width,
                height: self.height,
                channels: Channels::Gray,
                data: p,
            })
            .collect()
    }

    /// Recombine grayscale planes into one image, preserving plane order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidChannelCount`] unless exactly 1 or 3
    /// planes are given, [`CoreError::ChannelMismatch`] if any plane is not
    /// grayscale, and [`CoreError::DimensionMismatch`] if the plane sizes
    /// differ.
    pub fn merge_channels(planes: &[Image]) -> Result<Image> {
        let channels = Channels::from_count(planes.len() as u32)?;
        let first = &planes[0];
        for plane in planes {
            if plane.channels != Channels::Gray {
                return Err(CoreError::ChannelMismatch {
                    expected: "grayscale plane",
                    actual: plane.channel_count(),
                });
            }
            if plane.width != first.width || plane.height != first.height {
                return Err(CoreError::DimensionMismatch(
                    first.width,
                    first.height,
                    plane.width,
                    plane.height,
                ));
            }
        }

        let pixels = first.width as usize * first.height as usize;
        let n = channels.count() as usize;
        let mut data = vec![0u8; pixels * n];
        for (c, plane) in planes.iter().enumerate() {
            for (i, &v) in plane.data.iter().enumerate() {
                data[i * n + c] = v;
            }
        }

        Ok(Image {
            width: first.width,
            height: first.height,
            channels,
            data,
        })
    }

    /// Reduce to single-channel grayscale using ITU-R BT.601 weights.
    ///
    /// Grayscale input is returned unchanged (cloned).
    pub fn to_gray(&self) -> Image {
        match self.channels {
            Channels::Gray => self.clone(),
            Channels::Rgb => {
                let pixels = self.width as usize * self.height as usize;
                let mut data = Vec::with_capacity(pixels);
                for px in self.data.chunks_exact(3) {
                    let gray =
                        0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                    data.push((gray + 0.5) as u8);
                }
                Image {
                    width: self.width,
                    height: self.height,
                    channels: Channels::Gray,
                    data,
                }
            }
        }
    }

    /// Fill the whole image with one value per channel.
    ///
    /// Extra entries beyond the channel count are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `values` has fewer entries than the image has channels.
    pub fn fill(&mut self, values: &[u8]) {
        let n = self.channels.count() as usize;
        for px in self.data.chunks_exact_mut(n) {
            px.copy_from_slice(&values[..n]);
        }
    }
}
