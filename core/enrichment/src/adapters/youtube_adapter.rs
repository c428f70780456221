//! YouTube video provider adapter

use std::sync::Arc;

use async_trait::async_trait;
use youtube::{SearchParams, VideoItem, YoutubeClient};

use crate::{ProviderError, VideoCandidate, VideoProvider};

/// Primary tier: YouTube Data API keyword search
pub struct YoutubeProvider {
    client: Arc<YoutubeClient>,
}

impl YoutubeProvider {
    pub fn new(client: Arc<YoutubeClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoProvider for YoutubeProvider {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoCandidate>, ProviderError> {
        let params = SearchParams::new(query).with_max_results(limit);
        let videos = self.client.search_videos(&params).await?;
        Ok(videos.into_iter().map(VideoCandidate::from).collect())
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

impl From<VideoItem> for VideoCandidate {
    fn from(item: VideoItem) -> Self {
        VideoCandidate::youtube(item.video_id, item.title)
    }
}
