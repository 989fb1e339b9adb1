//! Catalog, meta and manifest resolution for the addon protocol.
//!
//! [`Addon`] owns the upstream gateways and every cache; callers hand it a
//! validated [`UserConfig`] per request.

pub mod cache;
mod catalog;
pub mod catalogs;
pub mod config;
mod manifest;
mod meta;
pub mod normalize;
pub mod params;
pub mod resolver;
pub mod trailers;

use std::sync::Arc;

use stremeta_core::stremio::Meta;
use stremeta_core::{MediaType, UserConfig};
use stremeta_metadata::fanart::FanartClient;
use stremeta_metadata::mdblist::MdbListClient;
use stremeta_metadata::models::{Genre, LanguageInfo};
use stremeta_metadata::posters::HttpImageProbe;
use stremeta_metadata::provider::{
    ImageProbe, ListProvider, LogoProvider, RatingProvider, TmdbApi,
};
use stremeta_metadata::ratings::CinemetaClient;
use stremeta_metadata::tmdb::TmdbClient;
use tracing::warn;

use crate::cache::{Clock, MetaCacheKey, SystemClock, TtlCache};
pub use crate::config::ServiceConfig;

/// Upstream collaborators, swappable for tests.
#[derive(Clone)]
pub struct Gateways {
    pub tmdb: Arc<dyn TmdbApi>,
    pub lists: Arc<dyn ListProvider>,
    pub logos: Arc<dyn LogoProvider>,
    pub ratings: Arc<dyn RatingProvider>,
    pub posters: Arc<dyn ImageProbe>,
}

impl Gateways {
    /// reqwest-backed clients for every upstream.
    pub fn http(settings: &ServiceConfig) -> Self {
        Self {
            tmdb: Arc::new(TmdbClient::new(settings.tmdb_api_key.clone())),
            lists: Arc::new(MdbListClient::new()),
            logos: Arc::new(FanartClient::new(settings.fanart_api_key.clone())),
            ratings: Arc::new(CinemetaClient::new()),
            posters: Arc::new(HttpImageProbe::new()),
        }
    }
}

pub struct Addon {
    gateways: Gateways,
    settings: ServiceConfig,
    meta_cache: TtlCache<MetaCacheKey, Meta>,
    /// IMDb ratings by IMDb id, kept for the life of the process.
    ratings: TtlCache<String, Option<String>>,
    /// Poster probe results by URL.
    poster_probes: TtlCache<String, bool>,
    genres: TtlCache<(MediaType, String), Vec<Genre>>,
    languages: TtlCache<(), Vec<LanguageInfo>>,
}

impl Addon {
    pub fn new(gateways: Gateways, settings: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            meta_cache: TtlCache::new(settings.meta_cache_ttl, clock.clone()),
            ratings: TtlCache::unbounded(clock.clone()),
            poster_probes: TtlCache::new(settings.poster_probe_ttl, clock.clone()),
            genres: TtlCache::unbounded(clock.clone()),
            languages: TtlCache::unbounded(clock),
            gateways,
            settings,
        }
    }

    /// Production wiring: HTTP gateways and the system clock.
    pub fn http(settings: ServiceConfig) -> Self {
        let gateways = Gateways::http(&settings);
        Self::new(gateways, settings, Arc::new(SystemClock))
    }

    pub fn settings(&self) -> &ServiceConfig {
        &self.settings
    }

    /// TMDB client for this user: their own key when they supplied one.
    fn tmdb_for(&self, config: &UserConfig) -> Arc<dyn TmdbApi> {
        config
            .tmdb_api_key
            .as_deref()
            .and_then(|key| self.gateways.tmdb.with_api_key(key))
            .unwrap_or_else(|| self.gateways.tmdb.clone())
    }

    /// Localized genre list; empty when TMDB cannot be reached.
    async fn genre_list(&self, tmdb: &dyn TmdbApi, media: MediaType, language: &str) -> Vec<Genre> {
        let key = (media, language.to_string());
        if let Some(hit) = self.genres.get(&key).await {
            return hit;
        }
        match tmdb.genres(media, language).await {
            Ok(genres) => {
                if !genres.is_empty() {
                    self.genres.insert(key, genres.clone()).await;
                }
                genres
            }
            Err(e) => {
                warn!(%media, language, error = %e, "genre list unavailable");
                Vec::new()
            }
        }
    }

    /// TMDB's language table; empty when TMDB cannot be reached.
    async fn language_list(&self, tmdb: &dyn TmdbApi) -> Vec<LanguageInfo> {
        if let Some(hit) = self.languages.get(&()).await {
            return hit;
        }
        match tmdb.languages().await {
            Ok(languages) => {
                if !languages.is_empty() {
                    self.languages.insert((), languages.clone()).await;
                }
                languages
            }
            Err(e) => {
                warn!(error = %e, "language list unavailable");
                Vec::new()
            }
        }
    }
}
