use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::AnilistError;

pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

pub struct AnilistClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

impl AnilistClient {
    /// Create an AnilistClient against the public endpoint.
    pub fn with_client(client: Client) -> Self {
        Self::with_endpoint(client, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// POST a GraphQL document and unwrap the `data` field.
    pub(crate) async fn execute<V, T>(&self, query: &str, variables: V) -> crate::Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

pub(crate) fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> crate::Result<T> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(AnilistError::RateLimited);
    }

    // AniList reports GraphQL errors with a 4xx status and a JSON body, so
    // try the envelope first and only fall back to a raw API error.
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    let envelope: GraphqlResponse<T> = match serde_path_to_error::deserialize(deserializer) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(AnilistError::Json {
                path: e.path().to_string(),
                source: e.into_inner(),
            })
        }
        Err(_) => {
            return Err(AnilistError::Api {
                status_code: status.as_u16(),
                message: body.to_string(),
            })
        }
    };

    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AnilistError::Graphql(message));
    }

    envelope.data.ok_or(AnilistError::MissingData)
}
