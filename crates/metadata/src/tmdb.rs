//! TMDB (The Movie Database) client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use std::sync::Arc;

use stremeta_core::MediaType;

use crate::MetadataError;
use crate::http::get_json;
use crate::models::{
    FindResults, Genre, GenreEnvelope, LanguageInfo, ResultsPage, SeasonDetails, TitleDetails,
    VideoList,
};
use crate::provider::TmdbApi;
use crate::query::QueryParams;

const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const DETAIL_APPENDS: &str = "videos,credits,external_ids";

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{path}", self.base_url);
        get_json(&self.client, "TMDB", &url, &all_params).await
    }
}

#[async_trait::async_trait]
impl TmdbApi for TmdbClient {
    fn with_api_key(&self, api_key: &str) -> Option<Arc<dyn TmdbApi>> {
        Some(Arc::new(Self {
            api_key: api_key.to_string(),
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }))
    }

    async fn discover(
        &self,
        media: MediaType,
        params: &QueryParams,
    ) -> Result<ResultsPage, MetadataError> {
        let pairs = params.to_pairs();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.get(&format!("/discover/{}", media.tmdb_segment()), &borrowed)
            .await
    }

    async fn search(
        &self,
        media: MediaType,
        query: &str,
        language: &str,
        page: u32,
        include_adult: bool,
    ) -> Result<ResultsPage, MetadataError> {
        let page = page.to_string();
        let include_adult = include_adult.to_string();
        self.get(
            &format!("/search/{}", media.tmdb_segment()),
            &[
                ("query", query),
                ("language", language),
                ("page", page.as_str()),
                ("include_adult", include_adult.as_str()),
            ],
        )
        .await
    }

    async fn details(
        &self,
        media: MediaType,
        tmdb_id: u64,
        language: &str,
    ) -> Result<TitleDetails, MetadataError> {
        self.get(
            &format!("/{}/{tmdb_id}", media.tmdb_segment()),
            &[("language", language), ("append_to_response", DETAIL_APPENDS)],
        )
        .await
    }

    async fn videos(
        &self,
        media: MediaType,
        tmdb_id: u64,
        language: &str,
    ) -> Result<VideoList, MetadataError> {
        self.get(
            &format!("/{}/{tmdb_id}/videos", media.tmdb_segment()),
            &[("language", language)],
        )
        .await
    }

    async fn season(
        &self,
        tmdb_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<SeasonDetails, MetadataError> {
        self.get(
            &format!("/tv/{tmdb_id}/season/{season_number}"),
            &[("language", language)],
        )
        .await
    }

    async fn genres(&self, media: MediaType, language: &str) -> Result<Vec<Genre>, MetadataError> {
        let envelope: GenreEnvelope = self
            .get(
                &format!("/genre/{}/list", media.tmdb_segment()),
                &[("language", language)],
            )
            .await?;
        Ok(envelope.genres)
    }

    async fn languages(&self) -> Result<Vec<LanguageInfo>, MetadataError> {
        self.get("/configuration/languages", &[]).await
    }

    async fn find_by_imdb_id(
        &self,
        media: MediaType,
        imdb_id: &str,
    ) -> Result<Option<u64>, MetadataError> {
        let found: FindResults = self
            .get(
                &format!("/find/{imdb_id}"),
                &[("external_source", "imdb_id")],
            )
            .await?;
        let hits = match media {
            MediaType::Movie => found.movie_results,
            MediaType::Series => found.tv_results,
        };
        Ok(hits.first().map(|t| t.id))
    }
}
