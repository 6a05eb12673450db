//! Project skeleton creation (`--create`)
//!
//! Lays out the dataset folder and result tree so a first run has
//! somewhere to read from and write to.

use anyhow::Context;
use std::path::Path;
use tracing::info;

use crate::batch::METHOD_DIRS;

/// Create the dataset directory and the full result tree.
///
/// Existing directories are left alone. Prints where to drop images
/// afterwards.
///
/// # Errors
///
/// Fails only on filesystem errors creating the directories.
pub fn create(dataset: &Path, output: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dataset)
        .with_context(|| format!("failed to create '{}'", dataset.display()))?;
    for dir in METHOD_DIRS {
        let path = output.join(dir);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
    }

    info!("created '{}' and '{}'", dataset.display(), output.display());
    info!(
        "add .jpg/.jpeg/.png/.bmp images to '{}' and run again without --create",
        dataset.display()
    );
    Ok(())
}
