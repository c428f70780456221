//! Error types for enrichment operations

use thiserror::Error;

/// Errors raised by a catalog or video provider call.
///
/// A legitimate zero-result search is not an error; it surfaces as
/// [`ResolutionState::Empty`](crate::ResolutionState::Empty).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    /// Carries the bound when the resolver's own deadline elapsed
    #[error("Request timed out{}", .0.map(|d| format!(" after {d:?}")).unwrap_or_default())]
    Timeout(Option<std::time::Duration>),

    #[error("Provider quota exceeded: {0}")]
    Quota(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Provider {0} is not configured")]
    NotConfigured(&'static str),
}

/// Transport failures; client-side timeouts land in `Timeout`.
fn transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(None)
    } else {
        ProviderError::Network(e.to_string())
    }
}

impl From<anilist::AnilistError> for ProviderError {
    fn from(e: anilist::AnilistError) -> Self {
        use anilist::AnilistError as E;
        match e {
            E::Request(e) => transport(e),
            E::RateLimited => ProviderError::Quota("AniList rate limit".to_string()),
            e @ (E::Json { .. } | E::Graphql(_) | E::MissingData) => {
                ProviderError::Malformed(e.to_string())
            }
            e @ E::Api { .. } => ProviderError::Network(e.to_string()),
        }
    }
}

impl From<youtube::YoutubeError> for ProviderError {
    fn from(e: youtube::YoutubeError) -> Self {
        use youtube::YoutubeError as E;
        match e {
            E::Request(e) => transport(e),
            E::QuotaExceeded(message) => ProviderError::Quota(message),
            e @ E::Json { .. } => ProviderError::Malformed(e.to_string()),
            e @ E::Api { .. } => ProviderError::Network(e.to_string()),
            E::MissingApiKey => ProviderError::NotConfigured("youtube"),
        }
    }
}

impl From<websearch::WebSearchError> for ProviderError {
    fn from(e: websearch::WebSearchError) -> Self {
        use websearch::WebSearchError as E;
        match e {
            E::Request(e) => transport(e),
            E::QuotaExceeded(message) => ProviderError::Quota(message),
            e @ E::Json { .. } => ProviderError::Malformed(e.to_string()),
            e @ E::Api { .. } => ProviderError::Network(e.to_string()),
            E::NotConfigured => ProviderError::NotConfigured("websearch"),
        }
    }
}

/// Errors returned by the fetch coordinator handle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("Fetch coordinator has stopped")]
    Closed,

    #[error("Resolution for entry {0} was discarded before completing")]
    Discarded(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}
