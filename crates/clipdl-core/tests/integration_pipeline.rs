//! Integration test: dataset files through collection, task preparation,
//! and the worker pool, using a backend fake that writes real files.

use async_trait::async_trait;
use clipdl_core::dataset;
use clipdl_core::downloader::{ClipDownloader, DownloaderOptions, MediaBackend};
use clipdl_core::error::{ClipResult, DownloadError};
use clipdl_core::retry::RetryPolicy;
use clipdl_core::task::Task;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

/// Backend fake: "fetches" by writing the locator into a scratch file and
/// "trims" by copying that file to the destination. Locators containing
/// the poison marker fail their fetch every time.
struct FakeBackend {
    poison: Option<&'static str>,
}

impl FakeBackend {
    fn good() -> Self {
        Self { poison: None }
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn fetch(&self, task: &Task, scratch_dir: &Path) -> ClipResult<PathBuf> {
        if let Some(marker) = self.poison {
            if task.source_locator.contains(marker) {
                return Err(DownloadError::fetch("fake: source unavailable"));
            }
        }
        let path = scratch_dir.join("fetch.mp4");
        std::fs::write(&path, task.source_locator.as_bytes())?;
        Ok(path)
    }

    async fn trim(&self, fetched: &Path, task: &Task) -> ClipResult<()> {
        let data = std::fs::read(fetched)?;
        std::fs::write(&task.destination_path, data)?;
        Ok(())
    }
}

fn write_dataset(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

fn pool_options(base: &Path, num_jobs: usize) -> DownloaderOptions {
    DownloaderOptions {
        num_jobs,
        workspace_dir: base.join("scratch"),
        retry: RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
    }
}

#[tokio::test]
async fn single_record_end_to_end_sequential() {
    let base = tempdir().unwrap();
    let out_dir = base.path().join("clips");
    std::fs::create_dir(&out_dir).unwrap();
    let source = write_dataset(
        base.path(),
        "train.json",
        r#"{
            "xyz": {
                "url": "https://www.youtube.com/watch?v=xyz",
                "annotations": { "segment": [10.0, 15.0] }
            }
        }"#,
    );

    let sources = dataset::valid_sources(&[source]);
    assert_eq!(sources.len(), 1);

    let collection = dataset::collect_videos(&sources).unwrap();
    assert_eq!(collection.videos.len(), 1);

    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].source_locator, "https://www.youtube.com/watch?v=xyz");
    assert_eq!(tasks[0].destination_path, out_dir.join("xyz.mp4"));
    assert_eq!(tasks[0].segment_start, 10);
    assert_eq!(tasks[0].segment_end, 15);

    let pool = ClipDownloader::new(pool_options(base.path(), 1), FakeBackend::good());
    let results = pool.run(tasks, None).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].identifier, "https://www.youtube.com/watch?v=xyz");
    assert!(results[0].succeeded);
    assert_eq!(results[0].detail, "Downloaded");
    assert!(out_dir.join("xyz.mp4").is_file(), "clip should exist");
}

#[tokio::test]
async fn duplicates_across_sources_collapse_to_one_task() {
    let base = tempdir().unwrap();
    let out_dir = base.path().join("clips");
    std::fs::create_dir(&out_dir).unwrap();

    let train = write_dataset(
        base.path(),
        "train.json",
        r#"{
            "a": { "url": "https://h/watch?v=shared", "annotations": { "segment": [0.0, 4.0] } },
            "b": { "url": "https://h/watch?v=only-train", "annotations": { "segment": [1.0, 2.0] } }
        }"#,
    );
    let val = write_dataset(
        base.path(),
        "val.json",
        r#"{
            "c": { "url": "https://mirror/watch?v=shared", "annotations": { "segment": [5.0, 9.0] } }
        }"#,
    );

    let collection = dataset::collect_videos(&[train, val]).unwrap();
    assert_eq!(collection.videos.len(), 2);
    assert_eq!(collection.duplicate_urls, vec!["https://mirror/watch?v=shared"]);

    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert_eq!(tasks.len(), 2);

    let pool = ClipDownloader::new(pool_options(base.path(), 2), FakeBackend::good());
    let results = pool.run(tasks, None).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.succeeded));
    assert!(out_dir.join("shared.mp4").is_file());
    assert!(out_dir.join("only-train.mp4").is_file());
    // First occurrence won: the shared clip came from the train source.
    let content = std::fs::read_to_string(out_dir.join("shared.mp4")).unwrap();
    assert_eq!(content, "https://h/watch?v=shared");
}

#[tokio::test]
async fn rerun_skips_existing_clips() {
    let base = tempdir().unwrap();
    let out_dir = base.path().join("clips");
    std::fs::create_dir(&out_dir).unwrap();
    std::fs::write(out_dir.join("have.mp4"), b"already here").unwrap();

    let source = write_dataset(
        base.path(),
        "train.json",
        r#"{
            "a": { "url": "https://h/watch?v=have", "annotations": { "segment": [0.0, 5.0] } },
            "b": { "url": "https://h/watch?v=want", "annotations": { "segment": [0.0, 5.0] } }
        }"#,
    );

    let collection = dataset::collect_videos(&[source]).unwrap();
    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].destination_path, out_dir.join("want.mp4"));

    let pool = ClipDownloader::new(pool_options(base.path(), 1), FakeBackend::good());
    pool.run(tasks, None).await.unwrap();

    // The pre-existing clip was left untouched.
    assert_eq!(std::fs::read(out_dir.join("have.mp4")).unwrap(), b"already here");

    // Everything is downloaded now, so the next run has nothing to do.
    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn failed_tasks_are_reported_and_retried_next_run() {
    let base = tempdir().unwrap();
    let out_dir = base.path().join("clips");
    std::fs::create_dir(&out_dir).unwrap();

    let source = write_dataset(
        base.path(),
        "train.json",
        r#"{
            "a": { "url": "https://h/watch?v=fine-1", "annotations": { "segment": [0.0, 5.0] } },
            "b": { "url": "https://h/watch?v=broken", "annotations": { "segment": [0.0, 5.0] } },
            "c": { "url": "https://h/watch?v=fine-2", "annotations": { "segment": [0.0, 5.0] } }
        }"#,
    );

    let collection = dataset::collect_videos(&[source]).unwrap();
    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert_eq!(tasks.len(), 3);

    let backend = FakeBackend {
        poison: Some("broken"),
    };
    let options = pool_options(base.path(), 2);
    let workspace_dir = options.workspace_dir.clone();
    let pool = ClipDownloader::new(options, backend);
    let results = pool.run(tasks, None).await.unwrap();

    assert_eq!(results.len(), 3, "every task produces a result");
    let failed: Vec<_> = results.iter().filter(|r| !r.succeeded).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].identifier, "https://h/watch?v=broken");
    assert!(failed[0].detail.contains("source unavailable"));

    assert!(out_dir.join("fine-1.mp4").is_file());
    assert!(out_dir.join("fine-2.mp4").is_file());
    assert!(!out_dir.join("broken.mp4").exists());
    assert!(!workspace_dir.exists(), "scratch space should be swept");

    // The failed clip is the only candidate on the next run.
    let tasks = dataset::prepare_tasks(&collection, &out_dir, "mp4").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].source_locator, "https://h/watch?v=broken");
}
