//! CLI for the clipdl bulk clip downloader.

mod run;

use anyhow::Result;
use clap::Parser;
use clipdl_core::config;
use std::path::PathBuf;

/// Bulk-download dataset video clips: fetch each source video, trim it to
/// its annotated segment, and drop clips that already exist on disk.
#[derive(Debug, Parser)]
#[command(name = "clipdl")]
#[command(about = "clipdl: bulk downloader for dataset video clips", long_about = None)]
pub struct Cli {
    /// Dataset annotation files (JSON). At least one must exist.
    #[arg(short, long = "sources", required = true, num_args = 1.., value_name = "FILE")]
    pub sources: Vec<PathBuf>,

    /// Directory for trimmed clips; created if missing.
    #[arg(short, long = "output_dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Extension of the output clips.
    #[arg(short, long = "extension", default_value = "mp4", value_name = "EXT")]
    pub extension: String,

    /// Number of tasks to run in parallel (1 = strictly sequential).
    #[arg(short, long = "num_jobs", default_value_t = 24, value_name = "N")]
    pub num_jobs: usize,

    /// Scratch directory for in-flight fetches (default: under the system
    /// temp dir). Removed when the batch finishes.
    #[arg(short, long = "tmp_dir", value_name = "DIR")]
    pub tmp_dir: Option<PathBuf>,

    /// Exit non-zero when any task fails.
    #[arg(long)]
    pub fail_on_error: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run::run_download(cli, &cfg).await
    }
}
