//! Mock providers for unit tests.
//!
//! Mocks are cheap to clone and share their recorded calls, so a test can
//! hand one clone to the code under test and inspect the other.
//!
//! ```ignore
//! let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![yt_candidate("a")]));
//! let resolver = TrailerResolver::new(vec![primary.as_tier()]);
//! resolver.resolve(&entry, &ResolveProfile::trailer()).await;
//! assert_eq!(primary.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::BrowseSection;
use crate::{
    CatalogDetail, CatalogEntry, CatalogSource, ProviderError, VideoCandidate, VideoProvider,
};

// ============================================================================
// Fixtures
// ============================================================================

pub fn yt_candidate(video_id: &str) -> VideoCandidate {
    VideoCandidate::youtube(video_id, format!("Video {video_id}"))
}

pub fn web_candidate(title: &str, link: &str) -> VideoCandidate {
    VideoCandidate {
        external_id: link.to_string(),
        title: title.to_string(),
        url: link.to_string(),
    }
}

// ============================================================================
// Mock Video Provider
// ============================================================================

/// Scripted response of a [`MockVideoProvider`].
#[derive(Clone, Debug)]
pub enum MockBehavior {
    Results(Vec<VideoCandidate>),
    Network,
    Quota,
    /// Never answers; only a timeout ends the call
    Hang,
}

impl MockBehavior {
    pub fn results(candidates: Vec<VideoCandidate>) -> Self {
        MockBehavior::Results(candidates)
    }
}

#[derive(Clone)]
pub struct MockVideoProvider {
    name: &'static str,
    behavior: Arc<Mutex<MockBehavior>>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
    in_flight: Arc<AtomicUsize>,
}

/// Counts a call as in flight until the search future is finished or dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockVideoProvider {
    pub fn new(name: &'static str, behavior: MockBehavior) -> Self {
        Self {
            name,
            behavior: Arc::new(Mutex::new(behavior)),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep before answering, to keep a request in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change the scripted response; calls already started keep the old one.
    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    /// A shared clone, ready to install as a resolver tier.
    pub fn as_tier(&self) -> Arc<dyn VideoProvider> {
        Arc::new(self.clone())
    }

    /// Recorded `(query, limit)` pairs, in call order.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|(query, _)| query).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls started but not yet finished (aborted calls are not counted).
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoProvider for MockVideoProvider {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<VideoCandidate>, ProviderError> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        let _in_flight = InFlight::enter(&self.in_flight);
        let behavior = self.behavior.lock().unwrap().clone();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match behavior {
            MockBehavior::Results(mut candidates) => {
                candidates.truncate(limit as usize);
                Ok(candidates)
            }
            MockBehavior::Network => Err(ProviderError::Network("connection reset".to_string())),
            MockBehavior::Quota => Err(ProviderError::Quota("quotaExceeded".to_string())),
            MockBehavior::Hang => std::future::pending().await,
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ============================================================================
// Mock Catalog
// ============================================================================

/// Catalog answering title searches from a fixed table.
///
/// Unknown queries return no entries.
#[derive(Clone, Default)]
pub struct MockCatalog {
    results: HashMap<String, Vec<CatalogEntry>>,
    failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    sections: HashMap<BrowseSection, Vec<CatalogEntry>>,
    searches: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, entries: Vec<CatalogEntry>) -> Self {
        self.results.insert(query.to_string(), entries);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failures.insert(query.to_string());
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_section(mut self, section: BrowseSection, entries: Vec<CatalogEntry>) -> Self {
        self.sections.insert(section, entries);
        self
    }

    /// Recorded `(text, page_size)` pairs, in call order.
    pub fn searches(&self) -> Vec<(String, u32)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn search_by_title(
        &self,
        text: &str,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, ProviderError> {
        self.searches
            .lock()
            .unwrap()
            .push((text.to_string(), page_size));

        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.contains(text) {
            return Err(ProviderError::Network("catalog unavailable".to_string()));
        }

        let mut entries = self.results.get(text).cloned().unwrap_or_default();
        entries.truncate(page_size as usize);
        Ok(entries)
    }

    async fn browse(&self, section: BrowseSection) -> Result<Vec<CatalogEntry>, ProviderError> {
        Ok(self.sections.get(&section).cloned().unwrap_or_default())
    }

    async fn detail(&self, id: i64) -> Result<CatalogDetail, ProviderError> {
        Err(ProviderError::Malformed(format!("no detail for {id}")))
    }

    fn name(&self) -> &'static str {
        "mock-catalog"
    }
}
