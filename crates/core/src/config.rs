//! Per-user addon configuration.
//!
//! The configure page serializes this as a JSON object into the addon URL.
//! Older installs put a bare language tag there instead, so
//! [`UserConfig::parse`] accepts both.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AddonError;
use crate::types::{AgeRating, MediaType};

pub const DEFAULT_LANGUAGE: &str = "en-US";

static LANGUAGE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,4})?$").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, deserialize_with = "lenient_age_rating")]
    pub age_rating: Option<AgeRating>,
    /// Rating-poster service key (`t0-…`, `t1-…`, …).
    #[serde(default)]
    pub rpdbkey: Option<String>,
    #[serde(default)]
    pub mdblistkey: Option<String>,
    /// Overrides the service-wide TMDB key for this user.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub provide_imdb_id: bool,
    #[serde(default, deserialize_with = "flag")]
    pub tmdb_prefix: bool,
    #[serde(default, deserialize_with = "flag")]
    pub hide_episode_thumbnails: bool,
    #[serde(default, deserialize_with = "flag")]
    pub include_adult: bool,
    #[serde(default = "enabled", deserialize_with = "flag_default_on")]
    pub search_enabled: bool,
    #[serde(default)]
    pub catalogs: Option<Vec<CatalogChoice>>,
}

/// One catalog the user picked on the configure page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogChoice {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "enabled", deserialize_with = "flag_default_on")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "flag")]
    pub show_in_home: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            age_rating: None,
            rpdbkey: None,
            mdblistkey: None,
            tmdb_api_key: None,
            provide_imdb_id: false,
            tmdb_prefix: false,
            hide_episode_thumbnails: false,
            include_adult: false,
            search_enabled: true,
            catalogs: None,
        }
    }
}

impl UserConfig {
    /// Parse the raw config segment of an addon URL and validate it.
    pub fn parse(raw: &str) -> Result<Self, AddonError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }

        let config = if raw.starts_with('{') {
            serde_json::from_str::<Self>(raw)
                .map_err(|e| AddonError::Config(format!("invalid configuration: {e}")))?
        } else {
            Self {
                language: raw.to_string(),
                ..Self::default()
            }
        };

        config.validated()
    }

    /// Normalize blank credentials to `None` and check the language tag.
    pub fn validated(mut self) -> Result<Self, AddonError> {
        for key in [
            &mut self.rpdbkey,
            &mut self.mdblistkey,
            &mut self.tmdb_api_key,
        ] {
            *key = key
                .take()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty());
        }

        if !LANGUAGE_TAG_RE.is_match(&self.language) {
            return Err(AddonError::Config(format!(
                "unsupported language tag: {}",
                self.language
            )));
        }

        Ok(self)
    }

    /// Primary language subtag (`pt` for `pt-BR`).
    pub fn language_code(&self) -> &str {
        primary_subtag(&self.language)
    }

    pub fn mdblist_key(&self) -> Option<&str> {
        self.mdblistkey.as_deref()
    }

    pub fn rpdb_key(&self) -> Option<&str> {
        self.rpdbkey.as_deref()
    }
}

/// `pt` for `pt-BR`, the whole tag when there is no region.
pub fn primary_subtag(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}

/// `BR` for `pt-BR`.
pub fn region_subtag(language: &str) -> Option<&str> {
    language.split('-').nth(1).filter(|r| !r.is_empty())
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

// The configure page has shipped both `true` and `"true"` over time.
fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Flag>::deserialize(d)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s.eq_ignore_ascii_case("true"),
        None => false,
    })
}

fn flag_default_on<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Flag>::deserialize(d)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => !s.eq_ignore_ascii_case("false"),
        None => true,
    })
}

fn lenient_age_rating<'de, D: Deserializer<'de>>(d: D) -> Result<Option<AgeRating>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.and_then(|s| serde_json::from_value(serde_json::Value::String(s)).ok()))
}
