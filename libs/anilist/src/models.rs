use serde::{Deserialize, Serialize};

/// AniList `MediaSort` enum values used by the browse pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSort {
    TrendingDesc,
    PopularityDesc,
    FavouritesDesc,
    ScoreDesc,
    SearchMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    #[default]
    Anime,
    Manga,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
}

/// Variables for the `Page { media(...) }` query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<MediaSort>>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<MediaFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageQuery {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            ..Default::default()
        }
    }

    pub fn sorted(mut self, sort: MediaSort) -> Self {
        self.sort = Some(vec![sort]);
        self
    }

    pub fn with_format(mut self, format: MediaFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverImage {
    pub large: Option<String>,
    pub medium: Option<String>,
}

/// Trailer as declared by AniList, e.g. `{ "id": "abc", "site": "youtube" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaTrailer {
    pub id: Option<String>,
    pub site: Option<String>,
}

/// Media item as returned by list and search queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: CoverImage,
    pub trailer: Option<MediaTrailer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuzzyDate {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Name {
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Name,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterEdge {
    pub node: Option<Person>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEdge {
    pub node: Option<Person>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<E> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<E>,
}

impl<E> Default for Connection<E> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// Full media record from the `Media(id:)` detail query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDetail {
    pub id: i64,
    #[serde(default)]
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: CoverImage,
    pub description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub episodes: Option<i32>,
    pub season: Option<String>,
    #[serde(default)]
    pub start_date: FuzzyDate,
    pub average_score: Option<i32>,
    pub popularity: Option<i64>,
    pub trailer: Option<MediaTrailer>,
    #[serde(default)]
    pub characters: Connection<CharacterEdge>,
    #[serde(default)]
    pub staff: Connection<StaffEdge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageMedia {
    #[serde(default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageData {
    #[serde(rename = "Page")]
    pub page: PageMedia,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MediaData {
    #[serde(rename = "Media")]
    pub media: MediaDetail,
}
