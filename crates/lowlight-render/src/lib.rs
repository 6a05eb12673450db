//! lowlight-render - Figure composition
//!
//! Rasterizes the two figure types the toolkit produces:
//!
//! - the 4-panel comparison strip written next to every batch result
//! - before/after histogram/CDF analysis figures for the diagnostic
//!   command

pub mod compare;
mod error;
pub mod plot;

pub use compare::{MARGIN, comparison_column, comparison_strip};
pub use error::{RenderError, RenderResult};
pub use plot::{PLOT_HEIGHT, PLOT_WIDTH, plot_histogram};

use lowlight_core::{Cdf, Histogram, Image};

/// One labeled side of an analysis figure: an image with its statistics.
pub struct AnalysisPanel<'a> {
    pub image: &'a Image,
    pub histogram: &'a Histogram,
    pub cdf: &'a Cdf,
}

/// Compose a before/after analysis figure.
///
/// Top row: the two images. Bottom row: their histogram/CDF plots.
///
/// # Errors
///
/// Propagates plot and composition failures.
pub fn analysis_figure(
    before: &AnalysisPanel<'_>,
    after: &AnalysisPanel<'_>,
) -> RenderResult<Image> {
    let before_plot = plot_histogram(before.histogram, before.cdf)?;
    let after_plot = plot_histogram(after.histogram, after.cdf)?;

    let images = comparison_strip(&[before.image, after.image])?;
    let plots = comparison_strip(&[&before_plot, &after_plot])?;
    comparison_column(&[&images, &plots])
}
