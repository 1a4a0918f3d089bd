//! The download pipeline: sources, collection, tasks, pool, status.

use anyhow::{Context, Result};
use clipdl_core::config::ClipdlConfig;
use clipdl_core::dataset;
use clipdl_core::downloader::{ClipDownloader, CommandBackend, DownloaderOptions};
use clipdl_core::retry::RetryPolicy;
use clipdl_core::task::TaskResult;
use std::path::PathBuf;
use std::time::Duration;

use super::Cli;

pub async fn run_download(cli: Cli, cfg: &ClipdlConfig) -> Result<()> {
    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("create output dir: {}", cli.output_dir.display()))?;

    let sources = dataset::valid_sources(&cli.sources);
    println!("Specified {} valid data sources:", sources.len());
    for source in &sources {
        println!("   - {}", source.display());
    }
    if sources.is_empty() {
        anyhow::bail!("none of the specified data sources exist");
    }

    let collection = dataset::collect_videos(&sources)?;
    for url in &collection.duplicate_urls {
        println!("[WARNING] Duplicated video: {}", url);
    }
    if !collection.duplicate_urls.is_empty() {
        println!("Num duplicated videos: {}", collection.duplicate_urls.len());
    }
    println!("Found {} unique videos.", collection.videos.len());

    let tasks = dataset::prepare_tasks(&collection, &cli.output_dir, &cli.extension)?;
    println!("Prepared {} tasks for downloading.", tasks.len());
    if tasks.is_empty() {
        return Ok(());
    }

    // Tool preflight happens only when there is real work to do, so a
    // fully-downloaded dataset can be re-checked on a machine without the
    // tools installed.
    let backend = CommandBackend::new(cfg.phase_timeout_secs.map(Duration::from_secs))?;
    let options = DownloaderOptions {
        num_jobs: cli.num_jobs,
        workspace_dir: cli.tmp_dir.clone().unwrap_or_else(default_tmp_dir),
        retry: RetryPolicy::from_config(cfg.retry.as_ref()),
    };
    let pool = ClipDownloader::new(options, backend);

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<TaskResult>(16);
    let progress_handle = tokio::spawn(async move {
        while let Some(result) = progress_rx.recv().await {
            print_result_line(&result);
        }
    });

    let results = pool.run(tasks, Some(progress_tx)).await?;
    let _ = progress_handle.await;

    print_status(&results);

    let failed = results.iter().filter(|r| !r.succeeded).count();
    println!("{} downloaded, {} failed.", results.len() - failed, failed);

    let fail_on_error = cli.fail_on_error || cfg.fail_on_error;
    if fail_on_error && failed > 0 {
        anyhow::bail!("{} task(s) failed", failed);
    }
    Ok(())
}

fn default_tmp_dir() -> PathBuf {
    std::env::temp_dir().join("clipdl")
}

fn print_result_line(result: &TaskResult) {
    if result.succeeded {
        println!("   - {}: {}", result.identifier, result.detail);
    } else {
        println!("   - {}: Error: {}", result.identifier, result.detail);
    }
}

fn print_status(results: &[TaskResult]) {
    if results.is_empty() {
        return;
    }

    println!("Status:");
    for result in results {
        print_result_line(result);
    }
}
