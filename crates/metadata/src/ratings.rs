//! IMDb ratings via Cinemeta's public meta endpoint.

use serde::Deserialize;

use crate::MetadataError;
use crate::http::get_json;
use crate::provider::RatingProvider;
use stremeta_core::MediaType;

const BASE_URL: &str = "https://v3-cinemeta.strem.io";

#[derive(Debug, Deserialize)]
struct CinemetaEnvelope {
    meta: Option<CinemetaMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CinemetaMeta {
    imdb_rating: Option<String>,
}

#[derive(Clone)]
pub struct CinemetaClient {
    base_url: String,
    client: reqwest::Client,
}

impl CinemetaClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for CinemetaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RatingProvider for CinemetaClient {
    async fn imdb_rating(
        &self,
        imdb_id: &str,
        media: MediaType,
    ) -> Result<Option<String>, MetadataError> {
        let url = format!("{}/meta/{}/{imdb_id}.json", self.base_url, media.as_str());
        let envelope: CinemetaEnvelope = match get_json(&self.client, "Cinemeta", &url, &[]).await
        {
            Ok(envelope) => envelope,
            Err(MetadataError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(envelope
            .meta
            .and_then(|m| m.imdb_rating)
            .filter(|r| !r.trim().is_empty()))
    }
}
