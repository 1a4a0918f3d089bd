//! Dataset handling: annotation parsing, multi-source collection with
//! duplicate elimination, and task preparation against the output directory.
//!
//! A dataset file is a JSON object mapping record keys to clip records;
//! identity comes from each record's URL, not from the key. Collection keeps
//! the first record per derived video identifier, and task preparation keeps
//! only videos whose output file does not already exist.

mod collect;
mod parse;
mod tasks;

pub use collect::{collect_videos, valid_sources, VideoCollection, VideoEntry};
pub use parse::{parse_dataset, Annotations, ClipRecord};
pub use tasks::prepare_tasks;
