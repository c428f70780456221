mod client;
mod error;
pub mod models;
mod search;

pub use client::{ApiKey, YoutubeClient};
pub use error::YoutubeError;
pub use models::{SearchParams, VideoItem};

pub type Result<T> = std::result::Result<T, YoutubeError>;
