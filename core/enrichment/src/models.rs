//! Core data models shared by the resolver, coordinator and views

use serde::{Deserialize, Serialize};

/// YouTube thumbnail base URL
pub const YOUTUBE_THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

/// Build a YouTube watch URL from a video id
pub fn youtube_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Site hosting a catalog-declared trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrailerProvider {
    Youtube,
    Other,
    None,
}

impl TrailerProvider {
    /// Map the catalog's free-form `site` field.
    pub fn from_site(site: Option<&str>) -> Self {
        match site.map(str::trim) {
            None | Some("") => TrailerProvider::None,
            Some(s) if s.eq_ignore_ascii_case("youtube") => TrailerProvider::Youtube,
            Some(_) => TrailerProvider::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredTrailer {
    pub provider: TrailerProvider,
    pub external_id: String,
}

/// A catalog entry as seen by the enrichment core. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub display_title: String,
    pub cover_image_url: String,
    pub declared_trailer: Option<DeclaredTrailer>,
    /// Title used for provider keyword searches (romaji when known)
    pub search_title: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: i64, display_title: impl Into<String>) -> Self {
        Self {
            id,
            display_title: display_title.into(),
            cover_image_url: String::new(),
            declared_trailer: None,
            search_title: None,
        }
    }

    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = url.into();
        self
    }

    pub fn with_trailer(mut self, provider: TrailerProvider, external_id: impl Into<String>) -> Self {
        self.declared_trailer = Some(DeclaredTrailer {
            provider,
            external_id: external_id.into(),
        });
        self
    }

    pub fn with_search_title(mut self, title: impl Into<String>) -> Self {
        self.search_title = Some(title.into());
        self
    }

    /// Title to feed into keyword searches
    pub fn query_title(&self) -> &str {
        self.search_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.display_title)
    }

    /// YouTube id of the declared trailer, if there is one
    pub fn youtube_trailer_id(&self) -> Option<&str> {
        self.declared_trailer
            .as_ref()
            .filter(|t| t.provider == TrailerProvider::Youtube && !t.external_id.is_empty())
            .map(|t| t.external_id.as_str())
    }
}

/// A playable (or at least linkable) video, in provider rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCandidate {
    pub external_id: String,
    pub title: String,
    pub url: String,
}

impl VideoCandidate {
    pub fn youtube(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        let external_id = video_id.into();
        Self {
            url: youtube_watch_url(&external_id),
            external_id,
            title: title.into(),
        }
    }

    pub fn is_youtube(&self) -> bool {
        self.url == youtube_watch_url(&self.external_id)
    }

    /// Small preview image, only known for YouTube videos
    pub fn thumbnail_url(&self) -> Option<String> {
        self.is_youtube().then(|| {
            format!(
                "{}/{}/default.jpg",
                YOUTUBE_THUMBNAIL_BASE_URL, self.external_id
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolutionState {
    Pending,
    Resolved,
    Empty,
    Failed,
}

impl ResolutionState {
    pub fn is_settled(self) -> bool {
        self != ResolutionState::Pending
    }
}

/// Outcome of resolving media for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub state: ResolutionState,
    pub candidates: Vec<VideoCandidate>,
    /// Tier that produced the candidates (diagnostics)
    pub resolved_by: Option<&'static str>,
}

impl ResolutionResult {
    pub fn pending() -> Self {
        Self {
            state: ResolutionState::Pending,
            candidates: Vec::new(),
            resolved_by: None,
        }
    }

    /// RESOLVED when there is at least one candidate, EMPTY otherwise.
    pub fn resolved(candidates: Vec<VideoCandidate>, source: &'static str) -> Self {
        if candidates.is_empty() {
            return Self::empty();
        }
        Self {
            state: ResolutionState::Resolved,
            candidates,
            resolved_by: Some(source),
        }
    }

    pub fn empty() -> Self {
        Self {
            state: ResolutionState::Empty,
            candidates: Vec::new(),
            resolved_by: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            state: ResolutionState::Failed,
            candidates: Vec::new(),
            resolved_by: None,
        }
    }

    /// Whether the UI has something to play. FAILED and EMPTY both render
    /// as "no media available".
    pub fn has_media(&self) -> bool {
        self.state == ResolutionState::Resolved && !self.candidates.is_empty()
    }

    /// Lead candidate URL
    pub fn primary_url(&self) -> Option<&str> {
        self.candidates.first().map(|c| c.url.as_str())
    }
}

/// Credited person on a catalog detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub name: String,
    pub role: String,
}

/// Extended metadata for one catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDetail {
    pub entry: CatalogEntry,
    pub title_romaji: Option<String>,
    pub title_english: Option<String>,
    pub title_native: Option<String>,
    /// Plain-text description (markup stripped)
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub episodes: Option<i32>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub average_score: Option<i32>,
    pub popularity: Option<i64>,
    pub characters: Vec<Credit>,
    pub staff: Vec<Credit>,
}

impl CatalogDetail {
    /// First staff member whose role mentions "director"
    pub fn director(&self) -> Option<&str> {
        self.staff
            .iter()
            .find(|c| c.role.to_lowercase().contains("director"))
            .map(|c| c.name.as_str())
    }
}
