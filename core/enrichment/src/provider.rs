//! Provider trait definitions

use async_trait::async_trait;

use crate::catalog::BrowseSection;
use crate::{CatalogDetail, CatalogEntry, ProviderError, VideoCandidate};

/// Read-only catalog metadata source (AniList).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Search entries by title, in the catalog's relevance order.
    async fn search_by_title(
        &self,
        text: &str,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, ProviderError>;

    /// List one browse section (trending, popular, ...).
    async fn browse(&self, section: BrowseSection) -> Result<Vec<CatalogEntry>, ProviderError>;

    /// Extended metadata for a single entry.
    async fn detail(&self, id: i64) -> Result<CatalogDetail, ProviderError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Keyword-based video search, one tier of the resolver fallback chain.
///
/// Implementations return at most `limit` candidates in the provider's
/// rank order. An empty vector is a legitimate "nothing found".
#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoCandidate>, ProviderError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
