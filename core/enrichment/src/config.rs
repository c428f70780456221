use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resolver::{LinkPolicy, DEFAULT_MULTI_LIMIT, DEFAULT_TIMEOUT};
use crate::search::{DEFAULT_MIN_QUERY_LEN, DEFAULT_NARROW_BREAKPOINT, DEFAULT_SEARCH_PAGE_SIZE};
use crate::selection::CollapsePolicy;

/// Enrichment configuration stored in a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub youtube: YoutubeSettings,
    #[serde(default)]
    pub websearch: WebSearchSettings,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub search: SearchSettings,
}

/// AniList GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "CatalogSettings::default_endpoint")]
    pub endpoint: String,
    /// Entries per incremental search request
    #[serde(default = "CatalogSettings::default_search_page_size")]
    pub search_page_size: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            search_page_size: Self::default_search_page_size(),
        }
    }
}

impl CatalogSettings {
    fn default_endpoint() -> String {
        anilist::DEFAULT_ENDPOINT.to_string()
    }

    fn default_search_page_size() -> u32 {
        DEFAULT_SEARCH_PAGE_SIZE
    }
}

/// YouTube Data API v3 (primary tier)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeSettings {
    #[serde(default)]
    pub api_key: String,
}

impl YoutubeSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Google Custom Search JSON API (secondary tier)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchSettings {
    #[serde(default)]
    pub api_key: String,
    /// Programmable search engine id (`cx`)
    #[serde(default)]
    pub engine_id: String,
}

impl WebSearchSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.engine_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Per provider call
    #[serde(default = "ResolverSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Candidates kept for clips and songs
    #[serde(default = "ResolverSettings::default_multi_result_limit")]
    pub multi_result_limit: u32,
    #[serde(default)]
    pub link_policy: LinkPolicy,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            multi_result_limit: Self::default_multi_result_limit(),
            link_policy: LinkPolicy::default(),
        }
    }
}

impl ResolverSettings {
    fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT.as_secs()
    }

    fn default_multi_result_limit() -> u32 {
        DEFAULT_MULTI_LIMIT
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    #[serde(default)]
    pub collapse_policy: CollapsePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Minimum query length in characters
    #[serde(default = "SearchSettings::default_min_query_len")]
    pub min_query_len: usize,
    /// Widths below this (px) use the narrow result slot
    #[serde(default = "SearchSettings::default_narrow_breakpoint")]
    pub narrow_breakpoint: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_len: Self::default_min_query_len(),
            narrow_breakpoint: Self::default_narrow_breakpoint(),
        }
    }
}

impl SearchSettings {
    fn default_min_query_len() -> usize {
        DEFAULT_MIN_QUERY_LEN
    }

    fn default_narrow_breakpoint() -> u32 {
        DEFAULT_NARROW_BREAKPOINT
    }
}

impl EnrichmentConfig {
    /// Load config from file, or create it with defaults if missing.
    pub async fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let config: EnrichmentConfig = toml::from_str(&content)?;
                tracing::info!("Loaded enrichment config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }

                let default = EnrichmentConfig::default();
                let toml_str = toml::to_string_pretty(&default)?;
                tokio::fs::write(path, toml_str).await?;
                tracing::info!("Created default enrichment config at {}", path.display());
                Ok(default)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnrichmentConfig::default();
        assert_eq!(config.catalog.endpoint, "https://graphql.anilist.co");
        assert_eq!(config.catalog.search_page_size, 5);
        assert_eq!(config.resolver.timeout(), Duration::from_secs(10));
        assert_eq!(config.resolver.multi_result_limit, 10);
        assert_eq!(config.search.min_query_len, 3);
        assert_eq!(config.search.narrow_breakpoint, 768);
        assert_eq!(config.selection.collapse_policy, CollapsePolicy::KeepPlaying);
        assert!(!config.youtube.is_configured());
        assert!(!config.websearch.is_configured());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: EnrichmentConfig = toml::from_str(
            r#"
            [youtube]
            api_key = "yt-key"

            [websearch]
            api_key = "cse-key"

            [resolver]
            link_policy = "require_playable"

            [selection]
            collapse_policy = "stop_playback"
            "#,
        )
        .unwrap();

        assert!(config.youtube.is_configured());
        assert!(!config.websearch.is_configured());
        assert_eq!(config.resolver.link_policy, LinkPolicy::RequirePlayable);
        assert_eq!(config.resolver.timeout_secs, 10);
        assert_eq!(config.selection.collapse_policy, CollapsePolicy::StopPlayback);
        assert_eq!(config.catalog, CatalogSettings::default());
    }

    #[tokio::test]
    async fn test_load_or_create_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("enrichment-config-{}", std::process::id()));
        let path = dir.join("nested").join("enrichment.toml");
        let _ = tokio::fs::remove_dir_all(&dir).await;

        let created = EnrichmentConfig::load_or_create(&path).await.unwrap();
        assert_eq!(created, EnrichmentConfig::default());
        assert!(path.exists());

        let loaded = EnrichmentConfig::load_or_create(&path).await.unwrap();
        assert_eq!(loaded, created);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_toml() {
        let dir = std::env::temp_dir().join(format!("enrichment-bad-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("enrichment.toml");
        tokio::fs::write(&path, "[resolver]\ntimeout_secs = \"soon\"").await.unwrap();

        let err = EnrichmentConfig::load_or_create(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
