//! lowlight-cli - Batch command line
//!
//! The orchestration layer behind the `lowlight` binary: dataset
//! scanning, the batch loop, the `--create` skeleton and the histogram
//! diagnostics subcommand. The transforms themselves live in the
//! library crates.

pub mod analyze;
pub mod batch;
pub mod skeleton;

pub use analyze::AnalyzeMethod;
pub use batch::{BatchConfig, BatchSummary, METHOD_DIRS, folder_tally, scan_dataset};
