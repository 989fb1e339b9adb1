//! fanart.tv logos. Movies are keyed by TMDB id, series by TVDB id.

use serde::Deserialize;
use tracing::debug;

use crate::MetadataError;
use crate::http::get_json;
use crate::provider::{LogoProvider, LogoRequest};
use stremeta_core::MediaType;

const BASE_URL: &str = "https://webservice.fanart.tv/v3";

#[derive(Debug, Clone, Default, Deserialize)]
struct FanartImages {
    #[serde(default)]
    hdmovielogo: Vec<FanartImage>,
    #[serde(default)]
    movielogo: Vec<FanartImage>,
    #[serde(default)]
    hdtvlogo: Vec<FanartImage>,
    #[serde(default)]
    clearlogo: Vec<FanartImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FanartImage {
    pub url: String,
    #[serde(default)]
    pub lang: Option<String>,
    /// fanart.tv sends vote counts as strings.
    #[serde(default)]
    pub likes: Option<String>,
}

impl FanartImage {
    fn like_count(&self) -> u32 {
        self.likes
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Clone)]
pub struct FanartClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl FanartClient {
    /// Without a key every lookup resolves to "no logo".
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl LogoProvider for FanartClient {
    async fn logo(&self, request: &LogoRequest<'_>) -> Result<Option<String>, MetadataError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let url = match request.media {
            MediaType::Movie => format!("{}/movies/{}", self.base_url, request.tmdb_id),
            MediaType::Series => match request.tvdb_id {
                Some(tvdb_id) => format!("{}/tv/{tvdb_id}", self.base_url),
                None => {
                    debug!(tmdb_id = request.tmdb_id, "series has no TVDB id, no logo lookup");
                    return Ok(None);
                }
            },
        };

        let images: FanartImages =
            match get_json(&self.client, "fanart.tv", &url, &[("api_key", api_key)]).await {
                Ok(images) => images,
                Err(MetadataError::NotFound) => return Ok(None),
                Err(e) => return Err(e),
            };

        let candidates: Vec<FanartImage> = match request.media {
            MediaType::Movie => images.hdmovielogo.into_iter().chain(images.movielogo).collect(),
            MediaType::Series => images.hdtvlogo.into_iter().chain(images.clearlogo).collect(),
        };

        let language = request.language.split('-').next().unwrap_or(request.language);
        Ok(pick_logo(&candidates, language, request.original_language).map(|img| img.url.clone()))
    }
}

/// Best logo for a viewer: their language, then the title's original
/// language, then English, then anything. Most liked wins within a tier.
pub fn pick_logo<'a>(
    images: &'a [FanartImage],
    language: &str,
    original_language: Option<&str>,
) -> Option<&'a FanartImage> {
    let mut preferences = vec![language];
    if let Some(original) = original_language {
        preferences.push(original);
    }
    preferences.push("en");

    for lang in preferences {
        let best = images
            .iter()
            .filter(|img| img.lang.as_deref() == Some(lang))
            .max_by_key(|img| img.like_count());
        if best.is_some() {
            return best;
        }
    }

    images.iter().max_by_key(|img| img.like_count())
}
