//! Histogram diagnostics (`analyze` subcommand)
//!
//! Runs a single transform on one image and writes a figure showing the
//! image and its luminance histogram/CDF before and after.

use anyhow::Context;
use clap::ValueEnum;
use lowlight::enhance::{ClaheOptions, ThresholdOptions, clahe, power_law, threshold};
use lowlight::io::{read_image, write_image};
use lowlight::render::{AnalysisPanel, analysis_figure};
use lowlight::{Cdf, Histogram, Image};
use std::path::{Path, PathBuf};
use tracing::info;

/// Transform to diagnose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalyzeMethod {
    /// Power-law (gamma) correction
    PowerLaw,
    /// Contrast-limited adaptive histogram equalization
    Clahe,
    /// Per-channel adaptive thresholding
    Thresholding,
}

impl AnalyzeMethod {
    /// Suffix used in the output file name.
    pub fn name(self) -> &'static str {
        match self {
            Self::PowerLaw => "power_law",
            Self::Clahe => "clahe",
            Self::Thresholding => "thresholding",
        }
    }
}

/// Apply `method` to `input` and write `<stem>_<method>_analysis.png`
/// under `output`.
///
/// Returns the path of the written figure.
pub fn run(input: &Path, output: &Path, method: AnalyzeMethod) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .context("input file has no stem")?;

    let image = read_image(input)?;
    let transformed = match method {
        AnalyzeMethod::PowerLaw => power_law(&image, 0.5)?,
        AnalyzeMethod::Clahe => clahe(
            &image,
            &ClaheOptions {
                clip_limit: 2.0,
                ..Default::default()
            },
        )?,
        AnalyzeMethod::Thresholding => threshold(&image, &ThresholdOptions::default())?,
    };

    let figure = figure_for(&image, &transformed)?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create '{}'", output.display()))?;
    let path = output.join(format!("{stem}_{}_analysis.png", method.name()));
    write_image(&figure, &path)?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Build the before/after figure from luminance statistics.
fn figure_for(before: &Image, after: &Image) -> anyhow::Result<Image> {
    let before_gray = before.to_gray();
    let after_gray = after.to_gray();
    let before_hist = Histogram::of(&before_gray)?;
    let after_hist = Histogram::of(&after_gray)?;
    let before_cdf = Cdf::of(&before_hist);
    let after_cdf = Cdf::of(&after_hist);

    Ok(analysis_figure(
        &AnalysisPanel {
            image: before,
            histogram: &before_hist,
            cdf: &before_cdf,
        },
        &AnalysisPanel {
            image: after,
            histogram: &after_hist,
            cdf: &after_cdf,
        },
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lowlight::Channels;

    #[test]
    fn test_method_names() {
        assert_eq!(AnalyzeMethod::PowerLaw.name(), "power_law");
        assert_eq!(AnalyzeMethod::Clahe.name(), "clahe");
        assert_eq!(AnalyzeMethod::Thresholding.name(), "thresholding");
    }

    #[test]
    fn test_figure_for_dimensions() {
        let mut img = Image::new(40, 30, Channels::Rgb).unwrap();
        img.fill(&[60, 90, 120]);
        let brightened = power_law(&img, 0.5).unwrap();
        let figure = figure_for(&img, &brightened).unwrap();
        assert_eq!(figure.channels(), Channels::Rgb);
        assert!(figure.width() > 40);
        assert!(figure.height() > 30);
    }
}
