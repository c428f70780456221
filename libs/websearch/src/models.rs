use serde::Deserialize;

/// Custom Search accepts at most 10 results per request.
pub const MAX_NUM: u32 = 10;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub num: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num: MAX_NUM,
        }
    }

    pub fn with_num(mut self, num: u32) -> Self {
        self.num = num.clamp(1, MAX_NUM);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebResult {
    #[serde(default)]
    pub title: String,
    pub link: String,
}

/// `items` is omitted entirely when there are no hits.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<WebResult>,
}
