//! Service-wide settings, read from the environment at startup.

use std::time::Duration;

use stremeta_core::AddonError;

pub const DEFAULT_META_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_POSTER_PROBE_TTL_SECS: u64 = 600;
pub const DEFAULT_LIST_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub tmdb_api_key: String,
    pub fanart_api_key: Option<String>,
    /// Public base URL of the addon, used in deep links and manifest art.
    pub host_name: String,
    pub meta_cache_ttl: Duration,
    pub poster_probe_ttl: Duration,
    /// Detail builds in flight per MDBList page.
    pub list_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            fanart_api_key: None,
            host_name: String::new(),
            meta_cache_ttl: Duration::from_secs(DEFAULT_META_CACHE_TTL_SECS),
            poster_probe_ttl: Duration::from_secs(DEFAULT_POSTER_PROBE_TTL_SECS),
            list_concurrency: DEFAULT_LIST_CONCURRENCY,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, AddonError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AddonError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let tmdb_api_key = var("STREMETA_TMDB_KEY")
            .ok_or_else(|| AddonError::Config("STREMETA_TMDB_KEY is not set".into()))?;

        let secs = |name: &str, default: Duration| -> Result<Duration, AddonError> {
            match var(name) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| AddonError::Config(format!("{name} must be a number of seconds"))),
                None => Ok(default),
            }
        };

        let list_concurrency = match var("STREMETA_LIST_CONCURRENCY") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AddonError::Config("STREMETA_LIST_CONCURRENCY must be a positive integer".into())
                })?,
            None => defaults.list_concurrency,
        };

        Ok(Self {
            tmdb_api_key,
            fanart_api_key: var("STREMETA_FANART_KEY"),
            host_name: var("STREMETA_HOST_NAME")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or(defaults.host_name),
            meta_cache_ttl: secs("STREMETA_META_CACHE_TTL_SECS", defaults.meta_cache_ttl)?,
            poster_probe_ttl: secs("STREMETA_POSTER_PROBE_TTL_SECS", defaults.poster_probe_ttl)?,
            list_concurrency,
        })
    }
}
