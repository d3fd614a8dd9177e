//! Media download and probing via external tools.

mod downloader;

pub use downloader::{MediaDownloader, VideoProbe};
