pub mod config;
pub mod logging;

// Pipeline modules
pub mod command;
pub mod dataset;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod retry;
pub mod task;
pub mod transcode;
pub mod video_id;
pub mod workspace;
