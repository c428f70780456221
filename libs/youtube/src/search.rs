use crate::{
    models::{SearchListResponse, SearchParams, VideoItem},
    YoutubeClient,
};

impl YoutubeClient {
    /// Keyword video search.
    ///
    /// GET /search?part=snippet&type=video
    pub async fn search_videos(&self, params: &SearchParams) -> crate::Result<Vec<VideoItem>> {
        let url = self.url("/search");
        let api_key = self.api_key()?;
        let max_results = params.max_results.to_string();

        let response = self
            .client()
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", params.query.as_str()),
                ("maxResults", max_results.as_str()),
                ("key", api_key.as_str()),
            ])
            .send()
            .await?;

        let list: SearchListResponse = self.handle_response(response).await?;
        Ok(list.into_videos())
    }
}
