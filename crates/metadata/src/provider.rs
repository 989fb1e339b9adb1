use std::sync::Arc;

use stremeta_core::MediaType;

use crate::MetadataError;
use crate::models::{
    Genre, LanguageInfo, MdbListItems, ResultsPage, SeasonDetails, TitleDetails, VideoList,
};
use crate::query::QueryParams;

/// TMDB v3 endpoints the addon consumes.
#[async_trait::async_trait]
pub trait TmdbApi: Send + Sync {
    /// A client bound to a user-supplied API key, when the implementation
    /// can be rebound. `None` means "keep using this one".
    fn with_api_key(&self, _api_key: &str) -> Option<Arc<dyn TmdbApi>> {
        None
    }

    async fn discover(
        &self,
        media: MediaType,
        params: &QueryParams,
    ) -> Result<ResultsPage, MetadataError>;

    async fn search(
        &self,
        media: MediaType,
        query: &str,
        language: &str,
        page: u32,
        include_adult: bool,
    ) -> Result<ResultsPage, MetadataError>;

    /// Title details with videos, credits and external ids appended.
    async fn details(
        &self,
        media: MediaType,
        tmdb_id: u64,
        language: &str,
    ) -> Result<TitleDetails, MetadataError>;

    async fn videos(
        &self,
        media: MediaType,
        tmdb_id: u64,
        language: &str,
    ) -> Result<VideoList, MetadataError>;

    async fn season(
        &self,
        tmdb_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<SeasonDetails, MetadataError>;

    async fn genres(&self, media: MediaType, language: &str) -> Result<Vec<Genre>, MetadataError>;

    async fn languages(&self) -> Result<Vec<LanguageInfo>, MetadataError>;

    /// TMDB id of the title carrying this IMDb id, if any.
    async fn find_by_imdb_id(
        &self,
        media: MediaType,
        imdb_id: &str,
    ) -> Result<Option<u64>, MetadataError>;
}

/// MDBList list contents.
#[async_trait::async_trait]
pub trait ListProvider: Send + Sync {
    async fn list_items(&self, list_id: &str, api_key: &str)
    -> Result<MdbListItems, MetadataError>;
}

/// Identifiers a logo source may key on.
#[derive(Debug, Clone)]
pub struct LogoRequest<'a> {
    pub media: MediaType,
    pub tmdb_id: u64,
    pub tvdb_id: Option<u64>,
    pub language: &'a str,
    pub original_language: Option<&'a str>,
}

#[async_trait::async_trait]
pub trait LogoProvider: Send + Sync {
    async fn logo(&self, request: &LogoRequest<'_>) -> Result<Option<String>, MetadataError>;
}

/// IMDb rating lookup.
#[async_trait::async_trait]
pub trait RatingProvider: Send + Sync {
    async fn imdb_rating(
        &self,
        imdb_id: &str,
        media: MediaType,
    ) -> Result<Option<String>, MetadataError>;
}

/// Checks whether an image URL resolves before it is handed to clients.
#[async_trait::async_trait]
pub trait ImageProbe: Send + Sync {
    async fn exists(&self, url: &str) -> Result<bool, MetadataError>;
}
