use crate::{
    models::{SearchRequest, SearchResponse, WebResult},
    WebSearchClient,
};

impl WebSearchClient {
    /// Run a web search, returning hits in Google's rank order.
    ///
    /// GET /customsearch/v1
    pub async fn search(&self, request: &SearchRequest) -> crate::Result<Vec<WebResult>> {
        let (api_key, engine_id) = self.credentials()?;
        let num = request.num.to_string();

        let response = self
            .client()
            .get(self.url())
            .query(&[
                ("q", request.query.as_str()),
                ("cx", engine_id),
                ("key", api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let body: SearchResponse = self.handle_response(response).await?;
        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::client::parse_body;
    use crate::models::{SearchRequest, SearchResponse};

    #[test]
    fn test_parse_items() {
        let body = r#"{"kind":"customsearch#search","items":[
            {"kind":"customsearch#result","title":"AMV","link":"https://x/y","snippet":"..."},
            {"kind":"customsearch#result","title":"Trailer","link":"https://www.youtube.com/watch?v=abc"}
        ]}"#;
        let response: SearchResponse = parse_body(StatusCode::OK, body).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].link, "https://x/y");
    }

    #[test]
    fn test_missing_items_means_no_results() {
        let body = r#"{"kind":"customsearch#search","searchInformation":{"totalResults":"0"}}"#;
        let response: SearchResponse = parse_body(StatusCode::OK, body).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_num_is_clamped() {
        assert_eq!(SearchRequest::new("q").with_num(50).num, 10);
        assert_eq!(SearchRequest::new("q").with_num(0).num, 1);
    }
}
