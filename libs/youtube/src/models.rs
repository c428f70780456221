use serde::Deserialize;

/// Parameters for `GET /search`.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub max_results: u32,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: 5,
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

/// A single ranked video hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItem {
    pub video_id: String,
    pub title: String,
}

impl VideoItem {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResult {
    pub id: ResourceId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Snippet {
    #[serde(default)]
    pub title: String,
}

impl SearchListResponse {
    /// Keep rank order; drop hits that are not videos (channels, playlists).
    pub(crate) fn into_videos(self) -> Vec<VideoItem> {
        self.items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
                Some(VideoItem {
                    video_id,
                    title: item.snippet.map(|s| s.title).unwrap_or_default(),
                })
            })
            .collect()
    }
}
