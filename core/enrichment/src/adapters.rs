//! Adapters from the leaf API clients to the provider traits

mod anilist_adapter;
mod websearch_adapter;
mod youtube_adapter;

pub use anilist_adapter::AnilistCatalog;
pub use websearch_adapter::WebSearchProvider;
pub use youtube_adapter::YoutubeProvider;
