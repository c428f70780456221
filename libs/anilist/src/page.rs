use crate::{
    models::{Media, PageData, PageQuery},
    AnilistClient,
};

const PAGE_QUERY: &str = r#"
query ($page: Int, $perPage: Int, $sort: [MediaSort], $type: MediaType, $format: MediaFormat, $search: String) {
  Page(page: $page, perPage: $perPage) {
    media(sort: $sort, type: $type, format: $format, search: $search) {
      id
      title { romaji english native }
      coverImage { large medium }
      trailer { id site }
    }
  }
}
"#;

impl AnilistClient {
    /// List media for one page, preserving AniList's ordering.
    pub async fn page(&self, query: &PageQuery) -> crate::Result<Vec<Media>> {
        let data: PageData = self.execute(PAGE_QUERY, query).await?;
        Ok(data.page.media)
    }

    /// Search anime by title.
    pub async fn search_anime(&self, search: &str, per_page: u32) -> crate::Result<Vec<Media>> {
        let query = PageQuery::new(per_page).with_search(search);
        self.page(&query).await
    }
}
