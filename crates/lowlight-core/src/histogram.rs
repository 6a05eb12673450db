//! Intensity histogram and cumulative distribution
//!
//! A [`Histogram`] counts the 256 intensity levels of one channel; a
//! [`Cdf`] is its running cumulative sum. Both back the diagnostic
//! before/after plots and the Otsu threshold computation.

use crate::error::{CoreError, Result};
use crate::image::{Channels, Image};

/// Number of intensity levels in an 8-bit channel.
pub const LEVELS: usize = 256;

/// Frequency count of intensities 0–255 for a single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Count intensities of a single-channel image.
    ///
    /// Multi-channel images must be reduced ([`Image::to_gray`]) or split
    /// into planes by the caller first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ChannelMismatch`] for multi-channel input.
    pub fn of(image: &Image) -> Result<Self> {
        if image.channels() != Channels::Gray {
            return Err(CoreError::ChannelMismatch {
                expected: "single channel",
                actual: image.channel_count(),
            });
        }
        Ok(Self::from_samples(image.data()))
    }

    /// Count intensities of a raw sample slice.
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut counts = [0u64; LEVELS];
        for &v in samples {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    /// Per-level counts.
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Count for one intensity level.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Total number of samples counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest single-bin count (0 for an empty histogram).
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Cumulative distribution of a [`Histogram`].
///
/// Monotonically non-decreasing; the final entry equals the histogram sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cdf {
    values: [u64; LEVELS],
}

impl Cdf {
    /// Running cumulative sum of the histogram bins.
    pub fn of(histogram: &Histogram) -> Self {
        let mut values = [0u64; LEVELS];
        let mut acc = 0u64;
        for (v, &count) in values.iter_mut().zip(histogram.counts()) {
            acc += count;
            *v = acc;
        }
        Self { values }
    }

    /// Cumulative values per level.
    pub fn values(&self) -> &[u64; LEVELS] {
        &self.values
    }

    /// Final cumulative value (total sample count).
    pub fn total(&self) -> u64 {
        self.values[LEVELS - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_known_buffer() {
        let hist = Histogram::from_samples(&[0, 0, 5, 255, 255, 255]);
        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(5), 1);
        assert_eq!(hist.count(255), 3);
        assert_eq!(hist.count(128), 0);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.peak(), 3);
    }

    #[test]
    fn test_histogram_rejects_rgb() {
        let img = Image::new(2, 2, Channels::Rgb).unwrap();
        assert!(matches!(
            Histogram::of(&img),
            Err(CoreError::ChannelMismatch { .. })
        ));
    }

    #[test]
    fn test_cdf_monotone_and_total() {
        let mut img = Image::new(10, 10, Channels::Gray).unwrap();
        for (i, v) in img.data_mut().iter_mut().enumerate() {
            *v = (i * 37 % 256) as u8;
        }
        let hist = Histogram::of(&img).unwrap();
        let cdf = Cdf::of(&hist);
        for pair in cdf.values().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(cdf.total(), hist.total());
        assert_eq!(cdf.total(), 100);
    }

    #[test]
    fn test_cdf_of_empty_histogram() {
        let hist = Histogram::from_samples(&[]);
        let cdf = Cdf::of(&hist);
        assert_eq!(cdf.total(), 0);
    }
}
