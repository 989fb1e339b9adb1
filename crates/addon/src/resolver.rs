//! Classifies a catalog id into the request the pipeline will run.

use stremeta_core::{AddonError, MediaType, UserConfig};

use crate::catalogs::{StreamingProvider, streaming_provider};

const MDBLIST_PREFIX: &str = "mdblist_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Tmdb,
    MdbList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Top,
    Year,
    Language,
    Search,
    Streaming(&'static StreamingProvider),
    MdbList {
        list_id: String,
        /// `None` when the id carries no usable media segment: both
        /// movies and shows of the list are served.
        list_media: Option<MediaType>,
    },
    /// Unknown `tmdb.*`-style id: plain discover with base parameters.
    Unfiltered,
}

/// One catalog call, immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub provider: Provider,
    pub media_type: MediaType,
    pub filter: FilterKind,
    pub raw_id: String,
    pub page: u32,
    /// Genre, year or language argument, depending on the filter.
    pub genre: Option<String>,
}

pub fn resolve(
    raw_id: &str,
    media_type: MediaType,
    page: u32,
    genre: Option<&str>,
    config: &UserConfig,
) -> Result<CatalogRequest, AddonError> {
    let genre = genre
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string);
    let page = page.max(1);

    if raw_id.starts_with(MDBLIST_PREFIX) {
        if config.mdblist_key().is_none() {
            return Err(AddonError::Config(format!(
                "catalog {raw_id} needs an MDBList API key"
            )));
        }

        let mut segments = raw_id.split('_').skip(1);
        let list_id = segments
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AddonError::BadRequest(format!("malformed MDBList catalog id: {raw_id}")))?
            .to_string();
        let list_media = segments.next().and_then(MediaType::parse);

        return Ok(CatalogRequest {
            provider: Provider::MdbList,
            media_type: list_media.unwrap_or(media_type),
            filter: FilterKind::MdbList {
                list_id,
                list_media,
            },
            raw_id: raw_id.to_string(),
            page,
            genre,
        });
    }

    let filter = if raw_id.contains("streaming") {
        let key = raw_id.split('.').nth(1).unwrap_or_default();
        let provider = streaming_provider(key).ok_or_else(|| {
            AddonError::NotFound(format!("streaming provider {key:?}"))
        })?;
        FilterKind::Streaming(provider)
    } else {
        match raw_id {
            "tmdb.top" => FilterKind::Top,
            "tmdb.year" => FilterKind::Year,
            "tmdb.language" => FilterKind::Language,
            "tmdb.search" => FilterKind::Search,
            _ => FilterKind::Unfiltered,
        }
    };

    Ok(CatalogRequest {
        provider: Provider::Tmdb,
        media_type,
        filter,
        raw_id: raw_id.to_string(),
        page,
        genre,
    })
}
