//! Annotation file structures and parsing.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One record in an annotation file. Fields beyond the ones used here
/// (labels, subsets, durations) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipRecord {
    pub url: String,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Annotations {
    /// `[start, end]` of the clip within the source video, in seconds.
    /// May be fractional in the file; rounded down to whole seconds.
    pub segment: [f64; 2],
}

/// Parses one annotation file into its records, keyed by record key.
///
/// A `BTreeMap` keeps within-file iteration order deterministic, which
/// pins down which record wins when one file contains duplicates.
pub fn parse_dataset(path: &Path) -> Result<BTreeMap<String, ClipRecord>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read dataset file: {}", path.display()))?;
    let records: BTreeMap<String, ClipRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse dataset JSON: {}", path.display()))?;
    Ok(records)
}
