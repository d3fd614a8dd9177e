//! CLI command implementations.

mod agent;
mod analyze;
mod channel;
mod comments;
mod config;
mod doctor;
mod download;
mod init;
mod predict;
mod search;
mod sentiment;
mod stats;
mod talents;
mod thumbnail;
mod transcribe;
mod video;
mod videos;

pub use agent::run_agent;
pub use analyze::run_analyze;
pub use channel::run_channel;
pub use comments::run_comments;
pub use config::run_config;
pub use doctor::run_doctor;
pub use download::run_download;
pub use init::run_init;
pub use predict::run_predict;
pub use search::run_search;
pub use sentiment::run_sentiment;
pub use stats::run_stats;
pub use talents::run_talents;
pub use thumbnail::run_thumbnail;
pub use transcribe::run_transcribe;
pub use video::run_video;
pub use videos::run_videos;
