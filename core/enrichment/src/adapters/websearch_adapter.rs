//! Google Custom Search provider adapter

use std::sync::Arc;

use async_trait::async_trait;
use websearch::{SearchRequest, WebResult, WebSearchClient};

use crate::links::youtube_video_id;
use crate::{ProviderError, VideoCandidate, VideoProvider};

/// Secondary tier: generic web search. Results carry the raw link, which
/// may not be a playable video.
pub struct WebSearchProvider {
    client: Arc<WebSearchClient>,
}

impl WebSearchProvider {
    pub fn new(client: Arc<WebSearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VideoProvider for WebSearchProvider {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoCandidate>, ProviderError> {
        let request = SearchRequest::new(query).with_num(limit);
        let results = self.client.search(&request).await?;
        Ok(results.into_iter().map(VideoCandidate::from).collect())
    }

    fn name(&self) -> &'static str {
        "websearch"
    }
}

impl From<WebResult> for VideoCandidate {
    fn from(result: WebResult) -> Self {
        // Keep the link as-is so playback gets exactly what the search returned.
        let external_id = youtube_video_id(&result.link).unwrap_or_else(|| result.link.clone());
        VideoCandidate {
            external_id,
            title: result.title,
            url: result.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_link_is_kept_verbatim() {
        let candidate = VideoCandidate::from(WebResult {
            title: "AMV".into(),
            link: "https://x/y".into(),
        });
        assert_eq!(candidate.url, "https://x/y");
        assert_eq!(candidate.external_id, "https://x/y");
    }

    #[test]
    fn test_youtube_link_gets_video_id() {
        let candidate = VideoCandidate::from(WebResult {
            title: "PV".into(),
            link: "https://www.youtube.com/watch?v=abc".into(),
        });
        assert_eq!(candidate.external_id, "abc");
        assert!(candidate.is_youtube());
    }
}
