use serde::Serialize;

use crate::{
    models::{MediaData, MediaDetail, MediaType},
    AnilistClient,
};

const MEDIA_QUERY: &str = r#"
query ($id: Int, $type: MediaType) {
  Media(id: $id, type: $type) {
    id
    title { romaji english native }
    coverImage { large medium }
    description
    genres
    episodes
    season
    startDate { year }
    averageScore
    popularity
    trailer { site id }
    characters { edges { node { name { full } } role } }
    staff { edges { node { name { full } } role } }
  }
}
"#;

#[derive(Serialize)]
struct MediaVariables {
    id: i64,
    #[serde(rename = "type")]
    media_type: MediaType,
}

impl AnilistClient {
    /// Get anime details by ID.
    pub async fn get_media(&self, id: i64) -> crate::Result<MediaDetail> {
        let variables = MediaVariables {
            id,
            media_type: MediaType::Anime,
        };
        let data: MediaData = self.execute(MEDIA_QUERY, variables).await?;
        Ok(data.media)
    }
}
