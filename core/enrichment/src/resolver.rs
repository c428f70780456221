//! Tiered media resolution for a single catalog entry.
//!
//! One algorithm serves trailers, clips and songs. A [`ResolveProfile`]
//! selects the query suffix, whether the catalog-declared trailer may
//! short-circuit the search, how many candidates to keep, and which tiers
//! take part.
//!
//! ```text
//!  declared YouTube trailer ──► RESOLVED (no network)
//!          │ none
//!          ▼
//!  tier 0 (youtube)  ──≥1──► RESOLVED
//!          │ 0 / error
//!          ▼
//!  tier 1 (websearch) ──≥1──► RESOLVED
//!          │ 0 ──► EMPTY      error on last tier ──► FAILED
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::links::is_playable;
use crate::{CatalogEntry, ProviderError, ResolutionResult, VideoCandidate, VideoProvider};

/// Default bound on a single provider call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Candidates requested for clip and song lists
pub const DEFAULT_MULTI_LIMIT: u32 = 10;

/// Hits fetched per tier in single-result mode, so a link policy has
/// something to choose from.
const SINGLE_MODE_FETCH: u32 = 5;

/// Tier name reported for catalog-declared trailers
pub const DECLARED_TIER: &str = "catalog";

/// What to accept from web search tiers, whose links are not
/// guaranteed to be playable videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    #[default]
    AcceptAny,
    RequirePlayable,
}

impl LinkPolicy {
    fn accepts(self, candidate: &VideoCandidate) -> bool {
        match self {
            LinkPolicy::AcceptAny => true,
            LinkPolicy::RequirePlayable => is_playable(&candidate.url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    /// Keep only the top-ranked candidate
    Single,
    /// Keep every candidate, up to `limit`
    Multi { limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSelection {
    All,
    PrimaryOnly,
}

/// Parameters distinguishing trailer, clip and song lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveProfile {
    pub name: &'static str,
    pub suffix: String,
    pub mode: ResultMode,
    pub use_declared: bool,
    pub tiers: TierSelection,
}

impl ResolveProfile {
    pub fn trailer() -> Self {
        Self {
            name: "trailer",
            suffix: "anime trailer".to_string(),
            mode: ResultMode::Single,
            use_declared: true,
            tiers: TierSelection::All,
        }
    }

    pub fn clips(limit: u32) -> Self {
        Self {
            name: "clips",
            suffix: "epic moments".to_string(),
            mode: ResultMode::Multi { limit },
            use_declared: false,
            tiers: TierSelection::PrimaryOnly,
        }
    }

    pub fn songs(limit: u32) -> Self {
        Self {
            name: "songs",
            suffix: "opening ending song audio".to_string(),
            mode: ResultMode::Multi { limit },
            use_declared: false,
            tiers: TierSelection::PrimaryOnly,
        }
    }

    /// Keyword query for an entry: `"<title> <suffix>"`
    pub fn query_for(&self, entry: &CatalogEntry) -> String {
        format!("{} {}", entry.query_title(), self.suffix)
    }

    fn fetch_limit(&self) -> u32 {
        match self.mode {
            ResultMode::Single => SINGLE_MODE_FETCH,
            ResultMode::Multi { limit } => limit,
        }
    }
}

/// Resolves playable media through an ordered list of provider tiers.
pub struct TrailerResolver {
    tiers: Vec<Arc<dyn VideoProvider>>,
    timeout: Duration,
    link_policy: LinkPolicy,
}

impl TrailerResolver {
    /// Tiers are tried in the given order; the first is the primary.
    pub fn new(tiers: Vec<Arc<dyn VideoProvider>>) -> Self {
        Self {
            tiers,
            timeout: DEFAULT_TIMEOUT,
            link_policy: LinkPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Resolve media for `entry`. Never returns PENDING.
    pub async fn resolve(&self, entry: &CatalogEntry, profile: &ResolveProfile) -> ResolutionResult {
        if profile.use_declared {
            if let Some(video_id) = entry.youtube_trailer_id() {
                tracing::debug!(
                    "Using declared trailer {} for entry {} ({})",
                    video_id,
                    entry.id,
                    profile.name
                );
                let candidate = VideoCandidate::youtube(video_id, entry.display_title.clone());
                return ResolutionResult::resolved(vec![candidate], DECLARED_TIER);
            }
        }

        let tiers = match profile.tiers {
            TierSelection::All => &self.tiers[..],
            TierSelection::PrimaryOnly => &self.tiers[..self.tiers.len().min(1)],
        };

        if tiers.is_empty() {
            tracing::warn!(
                "No video providers configured, cannot resolve {} for entry {}",
                profile.name,
                entry.id
            );
            return ResolutionResult::failed();
        }

        let query = profile.query_for(entry);
        let last = tiers.len() - 1;

        for (index, tier) in tiers.iter().enumerate() {
            match self.search_tier(tier.as_ref(), &query, profile.fetch_limit()).await {
                Ok(candidates) => {
                    let mut accepted: Vec<VideoCandidate> = candidates
                        .into_iter()
                        .filter(|c| self.link_policy.accepts(c))
                        .collect();

                    if accepted.is_empty() {
                        tracing::debug!("No results from {} for '{}'", tier.name(), query);
                        continue;
                    }

                    match profile.mode {
                        ResultMode::Single => accepted.truncate(1),
                        ResultMode::Multi { limit } => accepted.truncate(limit as usize),
                    }

                    tracing::debug!(
                        "Resolved {} for entry {} via {} ({} candidates)",
                        profile.name,
                        entry.id,
                        tier.name(),
                        accepted.len()
                    );
                    return ResolutionResult::resolved(accepted, tier.name());
                }
                Err(e) if index == last => {
                    tracing::warn!(
                        "{} search failed for '{}' on last tier: {}",
                        tier.name(),
                        query,
                        e
                    );
                    return ResolutionResult::failed();
                }
                Err(e) => {
                    tracing::warn!(
                        "{} search failed for '{}', falling back: {}",
                        tier.name(),
                        query,
                        e
                    );
                }
            }
        }

        tracing::debug!("No {} found for entry {}", profile.name, entry.id);
        ResolutionResult::empty()
    }

    async fn search_tier(
        &self,
        tier: &dyn VideoProvider,
        query: &str,
        limit: u32,
    ) -> Result<Vec<VideoCandidate>, ProviderError> {
        match tokio::time::timeout(self.timeout, tier.search(query, limit)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(Some(self.timeout))),
        }
    }
}
