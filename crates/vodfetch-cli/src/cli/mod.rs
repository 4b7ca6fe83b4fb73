//! CLI for the vodfetch stream downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vodfetch_core::config;

use commands::{run_batch, run_get};

/// Top-level CLI for the vodfetch stream downloader.
#[derive(Debug, Parser)]
#[command(name = "vodfetch")]
#[command(about = "vodfetch: sequential HLS stream downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a single named item.
    Get {
        /// Item name used for the canonical URL guess and the search fallback.
        name: String,

        /// Directory for the final file and muxer log (default: current dir).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Keep the per-job workspace directory for debugging.
        #[arg(long)]
        keep_workdir: bool,
    },

    /// Process a newline-delimited list of item names sequentially.
    Run {
        /// Path to the names file.
        #[arg(long, default_value = "names.txt", value_name = "FILE")]
        list: PathBuf,

        /// Directory for final files and muxer logs (default: current dir).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                name,
                output_dir,
                keep_workdir,
            } => run_get(&cfg, &name, output_dir, keep_workdir),
            CliCommand::Run { list, output_dir } => run_batch(&cfg, &list, output_dir),
        }
    }
}
