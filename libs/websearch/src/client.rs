use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::WebSearchError;

const BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Shared API key that can be updated at runtime.
pub type ApiKey = Arc<RwLock<String>>;

pub struct WebSearchClient {
    client: Client,
    api_key: ApiKey,
    engine_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorReason>,
}

#[derive(Debug, Deserialize)]
struct ErrorReason {
    #[serde(default)]
    reason: String,
}

impl WebSearchClient {
    /// Create a client for one programmable search engine (`cx`).
    pub fn new(client: Client, api_key: ApiKey, engine_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            engine_id: engine_id.into(),
        }
    }

    /// Current `(key, cx)` pair.
    pub(crate) fn credentials(&self) -> crate::Result<(String, &str)> {
        let key = self.api_key.read().clone();
        if key.is_empty() || self.engine_id.is_empty() {
            return Err(WebSearchError::NotConfigured);
        }
        Ok((key, self.engine_id.as_str()))
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self) -> &'static str {
        BASE_URL
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        parse_body(status, &body)
    }
}

pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> crate::Result<T> {
    if !status.is_success() {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let quota = status == StatusCode::TOO_MANY_REQUESTS
            || parsed.as_ref().is_some_and(|b| {
                b.error
                    .errors
                    .iter()
                    .any(|r| r.reason.ends_with("LimitExceeded") || r.reason == "quotaExceeded")
            });
        let message = parsed
            .map(|b| b.error.message)
            .unwrap_or_else(|| body.to_string());
        if quota {
            return Err(WebSearchError::QuotaExceeded(message));
        }
        return Err(WebSearchError::Api {
            status_code: status.as_u16(),
            message,
        });
    }

    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| WebSearchError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}
