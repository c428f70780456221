//! Media enrichment for an anime catalog
//!
//! Given catalog entries (from AniList), this crate finds playable media
//! for them (trailers, memorable clips, theme songs) through a chain of
//! video providers, caches and coalesces those lookups per screen, and
//! keeps the small amount of UI state needed to browse the results.
//!
//! # Architecture
//!
//! ```text
//!  SearchController ──► CatalogSource (AniList)
//!
//!  MediaView ─┬─ SelectionState
//!             └─ CoordinatorHandle ──► FetchCoordinatorActor
//!                                           │ one task per id
//!                                           ▼
//!                                    TrailerResolver
//!                                     │          │
//!                          ┌──────────┴───┐ ┌────┴─────────────┐
//!                          │YoutubeProvider│ │WebSearchProvider│
//!                          └──────────────┘ └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use enrichment::{EnrichmentConfig, EnrichmentServices};
//!
//! let config = EnrichmentConfig::load_or_create("config/enrichment.toml").await?;
//! let services = EnrichmentServices::new(config, reqwest::Client::new());
//!
//! let view = services.trailer_view();
//! view.toggle_expand(&entry).await?;
//! for candidate in view.visible_candidates() {
//!     println!("{} {}", candidate.title, candidate.url);
//! }
//! ```

mod adapters;
pub mod catalog;
pub mod config;
pub mod coordinator;
mod error;
pub mod links;
pub mod logging;
mod models;
mod provider;
pub mod resolver;
pub mod search;
pub mod selection;
mod services;
pub mod view;

#[cfg(test)]
mod mocks;

pub use adapters::{AnilistCatalog, WebSearchProvider, YoutubeProvider};
pub use catalog::BrowseSection;
pub use config::EnrichmentConfig;
pub use coordinator::{create_fetch_coordinator, CoordinatorHandle};
pub use error::{ConfigError, CoordinatorError, ProviderError};
pub use models::{
    youtube_watch_url, CatalogDetail, CatalogEntry, Credit, DeclaredTrailer, ResolutionResult,
    ResolutionState, TrailerProvider, VideoCandidate,
};
pub use provider::{CatalogSource, VideoProvider};
pub use resolver::{LinkPolicy, ResolveProfile, TrailerResolver};
pub use search::{SearchController, SearchOutcome, SearchSession, ViewportClass};
pub use selection::{CollapsePolicy, SelectionState, Transition};
pub use services::EnrichmentServices;
pub use view::{MediaView, ViewUpdate};
