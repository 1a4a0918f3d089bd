//! Collecting videos from all sources with duplicate elimination.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::parse::parse_dataset;
use crate::video_id::{filename_safe_id, video_id};

/// One collected video: where to fetch it from and which segment to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    pub url: String,
    /// Segment start in whole seconds.
    pub segment_start: u32,
    /// Segment end in whole seconds; always greater than the start.
    pub segment_end: u32,
}

/// Result of one collection pass over all sources.
#[derive(Debug, Default)]
pub struct VideoCollection {
    /// Unique videos keyed by filename-safe identifier (sorted iteration).
    pub videos: BTreeMap<String, VideoEntry>,
    /// URLs of records dropped because their identifier was already taken.
    /// First occurrence wins, in source order.
    pub duplicate_urls: Vec<String>,
    /// Records dropped for an unusable identifier or an empty segment.
    pub invalid_records: usize,
}

/// Keeps only the dataset paths that exist on disk, in the given order.
pub fn valid_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| p.exists()).cloned().collect()
}

/// Merges records from all sources, keyed by derived video identifier.
///
/// Sources are processed in the given order; within a file, records are
/// visited in key order. The first record seen per identifier wins and
/// later ones are recorded as duplicates. Records whose segment end is not
/// after its start, or whose identifier sanitizes to nothing, are dropped
/// and counted as invalid.
pub fn collect_videos(sources: &[PathBuf]) -> Result<VideoCollection> {
    let mut collection = VideoCollection::default();

    for source in sources {
        let records = parse_dataset(source)?;
        for record in records.into_values() {
            let Some(id) = filename_safe_id(video_id(&record.url)) else {
                tracing::warn!(url = %record.url, "skipping record with unusable identifier");
                collection.invalid_records += 1;
                continue;
            };

            let segment_start = record.annotations.segment[0] as u32;
            let segment_end = record.annotations.segment[1] as u32;
            if segment_end <= segment_start {
                tracing::warn!(
                    url = %record.url,
                    start = segment_start,
                    end = segment_end,
                    "skipping record with empty segment"
                );
                collection.invalid_records += 1;
                continue;
            }

            if collection.videos.contains_key(&id) {
                tracing::warn!(url = %record.url, id = %id, "duplicated video");
                collection.duplicate_urls.push(record.url);
            } else {
                collection.videos.insert(
                    id,
                    VideoEntry {
                        url: record.url,
                        segment_start,
                        segment_end,
                    },
                );
            }
        }
    }

    Ok(collection)
}
