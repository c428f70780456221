//! Wiring of clients, adapters and per-screen state.

use std::sync::Arc;

use anilist::AnilistClient;
use futures::future::join_all;
use parking_lot::RwLock;
use reqwest::Client;
use websearch::WebSearchClient;
use youtube::YoutubeClient;

use crate::adapters::{AnilistCatalog, WebSearchProvider, YoutubeProvider};
use crate::catalog::BrowseSection;
use crate::config::EnrichmentConfig;
use crate::coordinator::create_fetch_coordinator;
use crate::resolver::{ResolveProfile, TrailerResolver};
use crate::search::{SearchController, ViewportClass};
use crate::view::MediaView;
use crate::{CatalogEntry, CatalogSource, VideoProvider};

/// Entry point for a front end: owns the shared clients and hands out
/// independent views and search controllers.
pub struct EnrichmentServices {
    config: Arc<EnrichmentConfig>,
    catalog: Arc<dyn CatalogSource>,
    resolver: Arc<TrailerResolver>,
    /// Keys shared with installed tiers; `None` when no tier reads them
    youtube_key: Option<Arc<RwLock<String>>>,
    websearch_key: Option<Arc<RwLock<String>>>,
}

impl EnrichmentServices {
    /// Build the AniList catalog and every configured video tier.
    ///
    /// Tiers whose credentials are missing are left out of the chain.
    pub fn new(config: EnrichmentConfig, http_client: Client) -> Self {
        let anilist =
            AnilistClient::with_endpoint(http_client.clone(), config.catalog.endpoint.clone());
        let catalog: Arc<dyn CatalogSource> = Arc::new(AnilistCatalog::new(Arc::new(anilist)));

        let mut tiers: Vec<Arc<dyn VideoProvider>> = Vec::new();
        let mut youtube_key = None;
        let mut websearch_key = None;

        if config.youtube.is_configured() {
            let key = Arc::new(RwLock::new(config.youtube.api_key.clone()));
            let client = YoutubeClient::new(http_client.clone(), Arc::clone(&key));
            tiers.push(Arc::new(YoutubeProvider::new(Arc::new(client))));
            youtube_key = Some(key);
        }
        if config.websearch.is_configured() {
            let key = Arc::new(RwLock::new(config.websearch.api_key.clone()));
            let client = WebSearchClient::new(
                http_client,
                Arc::clone(&key),
                config.websearch.engine_id.clone(),
            );
            tiers.push(Arc::new(WebSearchProvider::new(Arc::new(client))));
            websearch_key = Some(key);
        }

        Self::assemble(config, catalog, tiers, youtube_key, websearch_key)
    }

    /// Assemble from already-built providers.
    ///
    /// The providers own their credentials, so key rotation is unavailable.
    pub fn with_providers(
        config: EnrichmentConfig,
        catalog: Arc<dyn CatalogSource>,
        tiers: Vec<Arc<dyn VideoProvider>>,
    ) -> Self {
        Self::assemble(config, catalog, tiers, None, None)
    }

    fn assemble(
        config: EnrichmentConfig,
        catalog: Arc<dyn CatalogSource>,
        tiers: Vec<Arc<dyn VideoProvider>>,
        youtube_key: Option<Arc<RwLock<String>>>,
        websearch_key: Option<Arc<RwLock<String>>>,
    ) -> Self {
        let resolver = TrailerResolver::new(tiers)
            .with_timeout(config.resolver.timeout())
            .with_link_policy(config.resolver.link_policy);

        if resolver.tier_names().is_empty() {
            tracing::warn!("No video providers configured; media lookups will fail");
        } else {
            tracing::info!("Video provider tiers: {}", resolver.tier_names().join(" -> "));
        }

        Self {
            config: Arc::new(config),
            catalog,
            resolver: Arc::new(resolver),
            youtube_key,
            websearch_key,
        }
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.catalog)
    }

    /// Player page: one trailer per entry. Each call owns a fresh cache.
    pub fn trailer_view(&self) -> MediaView {
        self.view(ResolveProfile::trailer())
    }

    /// Trending clips page
    pub fn clips_view(&self) -> MediaView {
        self.view(ResolveProfile::clips(self.config.resolver.multi_result_limit))
    }

    /// Top songs page
    pub fn songs_view(&self) -> MediaView {
        self.view(ResolveProfile::songs(self.config.resolver.multi_result_limit))
    }

    fn view(&self, profile: ResolveProfile) -> MediaView {
        let coordinator = create_fetch_coordinator(Arc::clone(&self.resolver), profile);
        MediaView::new(coordinator, self.config.selection.collapse_policy)
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(Arc::clone(&self.catalog))
            .with_min_query_len(self.config.search.min_query_len)
            .with_page_size(self.config.catalog.search_page_size)
    }

    pub fn viewport_class(&self, width: u32) -> ViewportClass {
        ViewportClass::from_width(width, self.config.search.narrow_breakpoint)
    }

    /// Fetch every home page section concurrently. A failed section is
    /// logged and comes back empty.
    pub async fn browse_home(&self) -> Vec<(BrowseSection, Vec<CatalogEntry>)> {
        let requests = BrowseSection::HOME.into_iter().map(|section| {
            let catalog = Arc::clone(&self.catalog);
            async move {
                match catalog.browse(section).await {
                    Ok(entries) => (section, entries),
                    Err(e) => {
                        tracing::warn!("Failed to load section '{}': {}", section.title(), e);
                        (section, Vec::new())
                    }
                }
            }
        });
        join_all(requests).await
    }

    /// Replace the YouTube API key used by the installed tier.
    ///
    /// Returns `false` when no YouTube tier reads a shared key.
    pub fn set_youtube_api_key(&self, key: impl Into<String>) -> bool {
        rotate_key(self.youtube_key.as_ref(), "youtube", key.into())
    }

    /// Replace the Custom Search API key used by the installed tier.
    ///
    /// Returns `false` when no web search tier reads a shared key.
    pub fn set_websearch_api_key(&self, key: impl Into<String>) -> bool {
        rotate_key(self.websearch_key.as_ref(), "websearch", key.into())
    }

    #[cfg(test)]
    fn youtube_key(&self) -> Option<String> {
        self.youtube_key.as_ref().map(|key| key.read().clone())
    }
}

fn rotate_key(slot: Option<&Arc<RwLock<String>>>, tier: &str, key: String) -> bool {
    match slot {
        Some(current) => {
            *current.write() = key;
            tracing::info!("Rotated {} API key", tier);
            true
        }
        None => {
            tracing::warn!("No {} tier installed, API key not rotated", tier);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{WebSearchSettings, YoutubeSettings};
    use crate::mocks::{web_candidate, MockBehavior, MockCatalog, MockVideoProvider};
    use crate::selection::CollapsePolicy;
    use crate::{ResolutionState, TrailerProvider};

    fn entries(ids: &[i64]) -> Vec<CatalogEntry> {
        ids.iter().map(|id| CatalogEntry::new(*id, format!("#{id}"))).collect()
    }

    #[tokio::test]
    async fn test_unconfigured_tiers_are_skipped() {
        let mut config = EnrichmentConfig::default();
        config.youtube = YoutubeSettings {
            api_key: "yt".into(),
        };
        config.websearch = WebSearchSettings {
            api_key: "cse".into(),
            engine_id: String::new(),
        };

        let services = EnrichmentServices::new(config, Client::new());
        assert_eq!(services.resolver.tier_names(), vec!["youtube"]);
    }

    #[tokio::test]
    async fn test_declared_trailer_resolves_without_providers() {
        let services = EnrichmentServices::new(EnrichmentConfig::default(), Client::new());
        let view = services.trailer_view();
        let entry = CatalogEntry::new(1, "x").with_trailer(TrailerProvider::Youtube, "qgQ");

        view.toggle_expand(&entry).await.unwrap();
        assert_eq!(view.visible_candidates().len(), 1);

        let entry = CatalogEntry::new(2, "y");
        view.toggle_expand(&entry).await.unwrap();
        assert_eq!(view.visible_result().map(|r| r.state), Some(ResolutionState::Failed));
    }

    #[tokio::test]
    async fn test_views_have_independent_caches() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![]));
        let secondary = MockVideoProvider::new(
            "websearch",
            MockBehavior::results(vec![web_candidate("AMV", "https://x/y")]),
        );
        let services = EnrichmentServices::with_providers(
            EnrichmentConfig::default(),
            Arc::new(MockCatalog::new()),
            vec![primary.as_tier(), secondary.as_tier()],
        );
        let entry = CatalogEntry::new(101, "Some Show");

        let trailer = services.trailer_view();
        trailer.toggle_expand(&entry).await.unwrap();
        assert_eq!(trailer.visible_candidates()[0].url, "https://x/y");

        // Clips only consult the primary tier.
        let clips = services.clips_view();
        clips.toggle_expand(&entry).await.unwrap();
        assert_eq!(
            clips.visible_result().map(|r| r.state),
            Some(ResolutionState::Empty)
        );
        assert_eq!(
            primary.queries(),
            vec![
                "Some Show anime trailer".to_string(),
                "Some Show epic moments".to_string()
            ]
        );
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_config_flows_into_components() {
        let mut config = EnrichmentConfig::default();
        config.selection.collapse_policy = CollapsePolicy::StopPlayback;
        config.search.narrow_breakpoint = 1024;
        config.catalog.search_page_size = 8;

        let catalog = MockCatalog::new();
        let services =
            EnrichmentServices::with_providers(config, Arc::new(catalog.clone()), vec![]);

        assert_eq!(services.viewport_class(900), ViewportClass::Narrow);
        assert_eq!(
            services.trailer_view().selection().policy(),
            CollapsePolicy::StopPlayback
        );

        services
            .search_controller()
            .on_query_change("frieren", ViewportClass::Wide)
            .await;
        assert_eq!(catalog.searches(), vec![("frieren".to_string(), 8)]);
    }

    #[tokio::test]
    async fn test_browse_home_returns_every_section() {
        let catalog = MockCatalog::new()
            .with_section(BrowseSection::Trending, entries(&[1, 2, 3]))
            .with_section(BrowseSection::PopularMovies, entries(&[4]));
        let services =
            EnrichmentServices::with_providers(EnrichmentConfig::default(), Arc::new(catalog), vec![]);

        let home = services.browse_home().await;

        let sections: Vec<_> = home.iter().map(|(s, _)| *s).collect();
        assert_eq!(sections, BrowseSection::HOME.to_vec());
        assert_eq!(home[0].1, entries(&[1, 2, 3]));
        assert_eq!(home[4].1, entries(&[4]));
        assert!(home[1].1.is_empty());
    }

    #[tokio::test]
    async fn test_key_rotation_reaches_installed_tier_only() {
        let mut config = EnrichmentConfig::default();
        config.youtube = YoutubeSettings {
            api_key: "old".into(),
        };
        let services = EnrichmentServices::new(config, Client::new());

        assert!(services.set_youtube_api_key("new"));
        assert_eq!(services.youtube_key().as_deref(), Some("new"));
        assert!(!services.set_websearch_api_key("cse"));
    }

    #[tokio::test]
    async fn test_key_rotation_unavailable_with_prebuilt_providers() {
        let services = EnrichmentServices::with_providers(
            EnrichmentConfig::default(),
            Arc::new(MockCatalog::new()),
            vec![],
        );

        assert!(!services.set_youtube_api_key("yt"));
        assert!(!services.set_websearch_api_key("cse"));
        assert_eq!(services.youtube_key(), None);
    }
}
