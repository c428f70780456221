//! Google Custom Search JSON API client.
//!
//! Used as a generic web search fallback: results are `{title, link}` pairs
//! and the link is not guaranteed to be a playable video.

mod client;
mod error;
pub mod models;
mod search;

pub use client::{ApiKey, WebSearchClient};
pub use error::WebSearchError;
pub use models::{SearchRequest, WebResult};

pub type Result<T> = std::result::Result<T, WebSearchError>;
