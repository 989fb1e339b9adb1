//! Response shapes of the addon protocol's `catalog`, `meta` and manifest
//! resources.

use serde::{Deserialize, Serialize};

use crate::types::MediaType;

pub const POSTER_SHAPE_REGULAR: &str = "regular";

/// One entry of a catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub poster_shape: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub genres: Vec<String>,
    pub year: String,
    pub imdb_rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub metas: Vec<MetaPreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_genres: Option<Vec<String>>,
}

impl CatalogResponse {
    pub fn empty() -> Self {
        Self {
            metas: Vec::new(),
            available_genres: None,
        }
    }
}

/// Full detail record for one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub name: String,
    #[serde(rename = "imdb_id")]
    pub imdb_id: Option<String>,
    pub imdb_rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub director: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub writer: Vec<String>,
    /// ISO-8601 timestamp of the first release / air date.
    pub released: Option<String>,
    pub release_info: String,
    pub year: String,
    pub runtime: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub slug: String,
    pub poster: Option<String>,
    pub background: Option<String>,
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<Video>,
    pub trailers: Vec<Trailer>,
    pub links: Vec<Link>,
    pub behavior_hints: BehaviorHints,
    #[serde(rename = "app_extras")]
    pub app_extras: AppExtras,
}

impl Meta {
    /// Catalog entry for this title, listed under `id`.
    pub fn preview(&self, id: String) -> MetaPreview {
        MetaPreview {
            id,
            media_type: self.media_type,
            name: self.name.clone(),
            poster: self.poster.clone(),
            poster_shape: POSTER_SHAPE_REGULAR.to_string(),
            background: self.background.clone(),
            genres: self.genres.clone(),
            year: self.year.clone(),
            imdb_rating: self.imdb_rating.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trailer {
    pub name: String,
    pub external_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub category: String,
    pub url: String,
}

/// An episode of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub season: u32,
    pub episode: u32,
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub default_video_id: Option<String>,
    pub has_scheduled_videos: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppExtras {
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<MediaType>,
    pub id_prefixes: Vec<String>,
    pub catalogs: Vec<ManifestCatalog>,
    pub behavior_hints: ManifestHints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestHints {
    pub configurable: bool,
    pub configuration_required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCatalog {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    pub extra: Vec<ExtraField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_home: Option<bool>,
}

/// A filter capability a catalog advertises (`genre`, `search`, `skip`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraField {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

impl ExtraField {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: None,
            is_required: None,
        }
    }
}
