//! Batch orchestration
//!
//! Enumerates the dataset directory, runs the three transforms on every
//! image in sequence, writes each variant into its method-named subfolder
//! and a 4-panel comparison figure next to them. A failing item is logged
//! and skipped; only a missing or empty dataset stops the run, and it does
//! so before anything is written.

use anyhow::Context;
use lowlight::enhance::{ClaheOptions, ThresholdOptions, clahe, power_law, threshold};
use lowlight::io::{has_supported_extension, read_image, write_image};
use lowlight::render::comparison_strip;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory names for the three method outputs plus the comparison
/// figures, in write order.
pub const METHOD_DIRS: [&str; 4] = ["power_law", "clahe", "thresholding", "comparisons"];

/// Batch run configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for input images.
    pub dataset: PathBuf,
    /// Root of the result tree; method subfolders are created below it.
    pub output: PathBuf,
    /// Gamma for the power-law variant.
    pub gamma: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dataset"),
            output: PathBuf::from("results/dataset_results"),
            gamma: 0.5,
        }
    }
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Matching files found in the dataset directory.
    pub found: usize,
    /// Images fully processed (all four outputs written).
    pub completed: usize,
    /// Skipped images with the reason, in processing order.
    pub failed: Vec<(String, String)>,
}

/// List the image files a batch run would process, sorted by name.
///
/// Only existing directories yield entries; extensions are matched
/// case-insensitively against the supported set.
pub fn scan_dataset(dataset: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dataset)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_supported_extension(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Run the batch over `config.dataset`.
///
/// Returns a summary; per-item failures are recorded there, not raised.
/// A missing or empty dataset directory produces an empty summary and a
/// warning, with zero writes.
pub fn run(config: &BatchConfig) -> anyhow::Result<BatchSummary> {
    if !config.dataset.is_dir() {
        warn!(
            "dataset directory '{}' not found; create it and add images (or run with --create)",
            config.dataset.display()
        );
        return Ok(BatchSummary::default());
    }

    let files = scan_dataset(&config.dataset)
        .with_context(|| format!("failed to scan '{}'", config.dataset.display()))?;
    if files.is_empty() {
        warn!(
            "no images found in '{}' (supported: jpg, jpeg, png, bmp)",
            config.dataset.display()
        );
        return Ok(BatchSummary::default());
    }

    for dir in METHOD_DIRS {
        std::fs::create_dir_all(config.output.join(dir))
            .with_context(|| format!("failed to create output folder '{dir}'"))?;
    }

    info!("Total {} images found", files.len());

    let mut summary = BatchSummary {
        found: files.len(),
        ..Default::default()
    };
    for (index, path) in files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("[{}/{}] Processing: {}", index + 1, files.len(), name);

        match process_one(path, config) {
            Ok(()) => {
                summary.completed += 1;
                info!("Completed: {name}");
            }
            Err(e) => {
                warn!("skipping {name}: {e:#}");
                summary.failed.push((name, format!("{e:#}")));
            }
        }
    }

    info!(
        "Done: {} of {} images processed, {} skipped",
        summary.completed,
        summary.found,
        summary.failed.len(),
    );
    for (dir, count) in folder_tally(&config.output) {
        info!("{}/{dir}: {count} files", config.output.display());
    }
    Ok(summary)
}

/// Count the files currently in each method folder under `output`.
///
/// Folders that do not exist count as zero.
pub fn folder_tally(output: &Path) -> Vec<(&'static str, usize)> {
    METHOD_DIRS
        .iter()
        .map(|&dir| {
            let count = std::fs::read_dir(output.join(dir))
                .map(|entries| {
                    entries
                        .filter_map(|e| e.ok())
                        .filter(|e| e.path().is_file())
                        .count()
                })
                .unwrap_or(0);
            (dir, count)
        })
        .collect()
}

/// Apply all three transforms to one file and persist the four outputs.
fn process_one(path: &Path, config: &BatchConfig) -> anyhow::Result<()> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .context("input file has no stem")?;

    let image = read_image(path)?;

    let enhanced_power_law = power_law(&image, config.gamma)?;
    let enhanced_clahe = clahe(&image, &ClaheOptions::default())?;
    let enhanced_threshold = threshold(&image, &ThresholdOptions::default())?;

    write_image(
        &enhanced_power_law,
        config.output.join(format!("power_law/{stem}_power_law.jpg")),
    )?;
    write_image(
        &enhanced_clahe,
        config.output.join(format!("clahe/{stem}_clahe.jpg")),
    )?;
    write_image(
        &enhanced_threshold,
        config
            .output
            .join(format!("thresholding/{stem}_thresholding.jpg")),
    )?;

    let figure = comparison_strip(&[
        &image,
        &enhanced_power_law,
        &enhanced_clahe,
        &enhanced_threshold,
    ])?;
    write_image(
        &figure,
        config
            .output
            .join(format!("comparisons/{stem}_comparison.png")),
    )?;

    Ok(())
}
