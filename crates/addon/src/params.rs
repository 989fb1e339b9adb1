//! Discover query parameters for TMDB-backed catalogs.

use stremeta_core::config::{primary_subtag, region_subtag};
use stremeta_core::{MediaType, UserConfig};
use stremeta_metadata::models::{Genre, LanguageInfo};
use stremeta_metadata::query::QueryParams;

use crate::resolver::{CatalogRequest, FilterKind};

const MIN_VOTE_COUNT: i64 = 10;
const STREAMING_MONETIZATION: &[&str] = &["flatrate", "free", "ads"];
const TOP_SERIES_MONETIZATION: &[&str] = &["flatrate", "free", "ads", "rent", "buy"];

/// Lookup tables the builder resolves names against.
#[derive(Debug, Clone, Copy)]
pub struct Lookups<'a> {
    pub genres: &'a [Genre],
    pub languages: &'a [LanguageInfo],
    pub current_year: i32,
}

pub fn build_discover_params(
    request: &CatalogRequest,
    language: &str,
    config: &UserConfig,
    lookups: Lookups<'_>,
) -> QueryParams {
    let media = request.media_type;
    let genre = request.genre.as_deref();

    let mut params = QueryParams::new();
    params
        .set("language", language)
        .set("page", request.page)
        .set("vote_count.gte", MIN_VOTE_COUNT);
    if config.include_adult {
        params.set("include_adult", "true");
    }

    if let Some(rating) = config.age_rating {
        let allowed = rating.allowed_certifications(media);
        if !allowed.is_empty() {
            params
                .set("certification_country", "US")
                .set("certification", allowed);
        }
    }

    match &request.filter {
        FilterKind::Streaming(provider) => {
            params
                .set_opt("with_genres", genre.and_then(|g| genre_id(g, lookups.genres)))
                .set("with_watch_providers", provider.watch_provider_id)
                .set("watch_region", provider.country)
                .set("with_watch_monetization_types", STREAMING_MONETIZATION);
        }
        FilterKind::Top => {
            params.set_opt("with_genres", genre.and_then(|g| genre_id(g, lookups.genres)));
            if media == MediaType::Series {
                params
                    .set_opt("watch_region", region_subtag(language))
                    .set("with_watch_monetization_types", TOP_SERIES_MONETIZATION);
            }
        }
        FilterKind::Year => {
            let key = match media {
                MediaType::Movie => "primary_release_year",
                MediaType::Series => "first_air_date_year",
            };
            match genre {
                Some(year) => params.set(key, year),
                None => params.set(key, lookups.current_year),
            };
        }
        FilterKind::Language => {
            let code = genre
                .and_then(|name| language_code(name, lookups.languages))
                .unwrap_or_else(|| primary_subtag(language));
            params.set("with_original_language", code);
        }
        FilterKind::Search | FilterKind::MdbList { .. } | FilterKind::Unfiltered => {}
    }

    params
}

pub fn genre_id(name: &str, genres: &[Genre]) -> Option<u32> {
    genres.iter().find(|g| g.name == name).map(|g| g.id)
}

/// ISO 639-1 code for a language shown by its English or native name.
pub fn language_code<'a>(name: &str, languages: &'a [LanguageInfo]) -> Option<&'a str> {
    languages
        .iter()
        .find(|l| l.english_name == name || l.name.as_deref() == Some(name))
        .map(|l| primary_subtag(&l.iso_639_1))
}
