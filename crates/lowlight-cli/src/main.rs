//! `lowlight` binary entry point.

use clap::{Parser, Subcommand};
use lowlight_cli::analyze::{self, AnalyzeMethod};
use lowlight_cli::batch::{self, BatchConfig};
use lowlight_cli::skeleton;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "lowlight",
    version,
    about = "Batch contrast enhancement for low-light photographs"
)]
struct Cli {
    /// Directory scanned for input images
    #[arg(long, default_value = "dataset", global = true)]
    dataset: PathBuf,

    /// Root directory for results
    #[arg(long, default_value = "results/dataset_results", global = true)]
    out: PathBuf,

    /// Create the dataset folder and result tree, then exit
    #[arg(long)]
    create: bool,

    /// Gamma for the power-law variant
    #[arg(long, default_value_t = 0.5)]
    gamma: f64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a before/after histogram figure for one image
    Analyze {
        /// Image file to diagnose
        input: PathBuf,
        /// Transform to apply
        #[arg(long, value_enum, default_value_t = AnalyzeMethod::Clahe)]
        method: AnalyzeMethod,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::Analyze { input, method }) => {
            analyze::run(&input, &cli.out, method).map(|_| ())
        }
        None if cli.create => skeleton::create(&cli.dataset, &cli.out),
        None => {
            let config = BatchConfig {
                dataset: cli.dataset,
                output: cli.out,
                gamma: cli.gamma,
            };
            batch::run(&config).map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
