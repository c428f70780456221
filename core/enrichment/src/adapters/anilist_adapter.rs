//! AniList catalog adapter

use std::sync::{Arc, LazyLock};

use anilist::{AnilistClient, Media, MediaDetail, MediaTitle, MediaTrailer};
use async_trait::async_trait;
use regex::Regex;

use crate::catalog::BrowseSection;
use crate::{
    CatalogDetail, CatalogEntry, CatalogSource, Credit, DeclaredTrailer, ProviderError,
    TrailerProvider,
};

pub struct AnilistCatalog {
    client: Arc<AnilistClient>,
}

impl AnilistCatalog {
    pub fn new(client: Arc<AnilistClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for AnilistCatalog {
    async fn search_by_title(
        &self,
        text: &str,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, ProviderError> {
        let media = self.client.search_anime(text, page_size).await?;
        Ok(media.into_iter().map(CatalogEntry::from).collect())
    }

    async fn browse(&self, section: BrowseSection) -> Result<Vec<CatalogEntry>, ProviderError> {
        let media = self.client.page(&section.page_query()).await?;
        Ok(media.into_iter().map(CatalogEntry::from).collect())
    }

    async fn detail(&self, id: i64) -> Result<CatalogDetail, ProviderError> {
        let media = self.client.get_media(id).await?;
        Ok(CatalogDetail::from(media))
    }

    fn name(&self) -> &'static str {
        "anilist"
    }
}

/// english > romaji > native
fn display_title(title: &MediaTitle) -> String {
    [&title.english, &title.romaji, &title.native]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty())
        .cloned()
        .unwrap_or_default()
}

fn declared_trailer(trailer: Option<MediaTrailer>) -> Option<DeclaredTrailer> {
    let trailer = trailer?;
    let external_id = trailer.id.filter(|id| !id.is_empty())?;
    Some(DeclaredTrailer {
        provider: TrailerProvider::from_site(trailer.site.as_deref()),
        external_id,
    })
}

fn build_entry(
    id: i64,
    title: &MediaTitle,
    cover: &anilist::CoverImage,
    trailer: Option<MediaTrailer>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        display_title: display_title(title),
        cover_image_url: cover
            .large
            .clone()
            .or_else(|| cover.medium.clone())
            .unwrap_or_default(),
        declared_trailer: declared_trailer(trailer),
        search_title: title.romaji.clone(),
    }
}

impl From<Media> for CatalogEntry {
    fn from(media: Media) -> Self {
        build_entry(media.id, &media.title, &media.cover_image, media.trailer)
    }
}

/// Strip the HTML markup AniList embeds in descriptions.
fn plain_description(raw: &str) -> String {
    static LINE_BREAK: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
    static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
    static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

    let text = LINE_BREAK.replace_all(raw, "\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">");
    BLANK_LINES.replace_all(text.trim(), "\n\n").to_string()
}

fn credits<E>(
    edges: Vec<E>,
    split: impl Fn(E) -> (Option<anilist::models::Person>, Option<String>),
) -> Vec<Credit> {
    edges
        .into_iter()
        .filter_map(|edge| {
            let (node, role) = split(edge);
            let name = node?.name.full.filter(|n| !n.is_empty())?;
            Some(Credit {
                name,
                role: role.unwrap_or_default(),
            })
        })
        .collect()
}

impl From<MediaDetail> for CatalogDetail {
    fn from(media: MediaDetail) -> Self {
        let entry = build_entry(media.id, &media.title, &media.cover_image, media.trailer);
        Self {
            entry,
            title_romaji: media.title.romaji,
            title_english: media.title.english,
            title_native: media.title.native,
            description: media
                .description
                .as_deref()
                .map(plain_description)
                .filter(|d| !d.is_empty()),
            genres: media.genres,
            episodes: media.episodes,
            season: media.season,
            year: media.start_date.year,
            average_score: media.average_score,
            popularity: media.popularity,
            characters: credits(media.characters.edges, |e| (e.node, e.role)),
            staff: credits(media.staff.edges, |e| (e.node, e.role)),
        }
    }
}
