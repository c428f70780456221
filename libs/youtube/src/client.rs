use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::YoutubeError;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Shared API key that can be updated at runtime.
pub type ApiKey = Arc<RwLock<String>>;

/// Error reasons Google uses for exhausted quota or throttling.
const QUOTA_REASONS: [&str; 4] = [
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

pub struct YoutubeClient {
    client: Client,
    api_key: ApiKey,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    reason: String,
}

impl YoutubeClient {
    /// Create a YoutubeClient with a reqwest Client.
    pub fn new(client: Client, api_key: ApiKey) -> Self {
        Self { client, api_key }
    }

    /// Get the current API key, failing early when none is set.
    pub(crate) fn api_key(&self) -> crate::Result<String> {
        let key = self.api_key.read().clone();
        if key.is_empty() {
            return Err(YoutubeError::MissingApiKey);
        }
        Ok(key)
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", BASE_URL, path)
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
        return Err(classify_error(status, body));
    }
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| YoutubeError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

fn classify_error(status: StatusCode, body: &str) -> YoutubeError {
    let parsed = serde_json::from_str::<GoogleErrorBody>(body).ok();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let message = parsed.map(|b| b.error.message).unwrap_or_default();
        return YoutubeError::QuotaExceeded(message);
    }

    match parsed {
        Some(body)
            if body
                .error
                .errors
                .iter()
                .any(|d| QUOTA_REASONS.contains(&d.reason.as_str())) =>
        {
            YoutubeError::QuotaExceeded(body.error.message)
        }
        Some(body) => YoutubeError::Api {
            status_code: status.as_u16(),
            message: body.error.message,
        },
        None => YoutubeError::Api {
            status_code: status.as_u16(),
            message: body.to_string(),
        },
    }
}
