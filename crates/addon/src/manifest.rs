use chrono::Datelike;
use futures::future::join_all;
use stremeta_core::config::{CatalogChoice, primary_subtag};
use stremeta_core::stremio::{ExtraField, Manifest, ManifestCatalog, ManifestHints};
use stremeta_core::{MediaType, UserConfig};
use stremeta_metadata::models::{Genre, LanguageInfo};
use tracing::{debug, warn};

use crate::Addon;
use crate::catalog::PAGE_SIZE;
use crate::catalogs::{CatalogDef, DEFAULT_CATALOGS, catalog_definition, translate};
use crate::normalize::{mdblist_genres, mdblist_media};

pub const ADDON_ID: &str = "org.stremeta.tmdb";
const ADDON_NAME: &str = "The Movie Database";
const YEARS_BACK: i32 = 20;
const TOP_OPTION: &str = "Top";
const TMDB_PREFIX: &str = "TMDB - ";
const MDBLIST_PREFIX: &str = "mdblist_";

/// Option lists shared by every built-in catalog of one manifest.
struct CatalogOptions {
    years: Vec<String>,
    movie_genres: Vec<String>,
    series_genres: Vec<String>,
    languages: Vec<String>,
}

impl Addon {
    /// Manifest for one user's configuration.
    pub async fn manifest(&self, config: &UserConfig) -> Manifest {
        let language = config.language.as_str();
        let tmdb = self.tmdb_for(config);

        let (movie_genres, series_genres, languages) = tokio::join!(
            self.genre_list(tmdb.as_ref(), MediaType::Movie, language),
            self.genre_list(tmdb.as_ref(), MediaType::Series, language),
            self.language_list(tmdb.as_ref()),
        );
        let options = CatalogOptions {
            years: year_options(chrono::Utc::now().year()),
            movie_genres: sorted_names(&movie_genres),
            series_genres: sorted_names(&series_genres),
            languages: language_options(language, &languages),
        };

        let choices = config.catalogs.clone().unwrap_or_else(default_catalogs);
        let built = join_all(
            choices
                .iter()
                .filter(|choice| choice.enabled)
                .map(|choice| self.manifest_catalog(choice, config, &options)),
        )
        .await;
        let mut catalogs: Vec<ManifestCatalog> = built.into_iter().flatten().collect();

        if config.search_enabled {
            let name = format!(
                "{}{}",
                prefix(config),
                translate(language, "search").unwrap_or("Search")
            );
            for media in [MediaType::Movie, MediaType::Series] {
                catalogs.push(ManifestCatalog {
                    id: "tmdb.search".into(),
                    media_type: media,
                    name: name.clone(),
                    page_size: None,
                    extra: vec![ExtraField {
                        is_required: Some(true),
                        ..ExtraField::named("search")
                    }],
                    show_in_home: None,
                });
            }
        }

        let mut id_prefixes = vec!["tmdb:".to_string()];
        if config.provide_imdb_id {
            id_prefixes.push("tt".into());
        }

        let host = self.settings.host_name.as_str();
        let asset = |file: &str| (!host.is_empty()).then(|| format!("{host}/{file}"));

        Manifest {
            id: ADDON_ID.into(),
            version: env!("CARGO_PKG_VERSION").into(),
            name: ADDON_NAME.into(),
            description: format!(
                "Metadata for movies and TV shows from TMDB, with customizable catalogs, MDBList lists and multi-language support. Current settings: {}",
                settings_summary(config, catalogs.len())
            ),
            resources: vec!["catalog".into(), "meta".into()],
            types: vec![MediaType::Movie, MediaType::Series],
            id_prefixes,
            catalogs,
            behavior_hints: ManifestHints {
                configurable: true,
                configuration_required: false,
            },
            favicon: asset("favicon.png"),
            logo: asset("logo.png"),
            background: asset("background.png"),
        }
    }

    async fn manifest_catalog(
        &self,
        choice: &CatalogChoice,
        config: &UserConfig,
        options: &CatalogOptions,
    ) -> Option<ManifestCatalog> {
        if choice.id.starts_with(MDBLIST_PREFIX) {
            return self.mdblist_manifest_catalog(choice, config).await;
        }

        let Some(def) = catalog_definition(&choice.id) else {
            debug!(catalog_id = %choice.id, "skipping unknown catalog");
            return None;
        };
        Some(builtin_catalog(choice, &def, config, options))
    }

    /// Genre options of an MDBList catalog come from the list itself.
    async fn mdblist_manifest_catalog(
        &self,
        choice: &CatalogChoice,
        config: &UserConfig,
    ) -> Option<ManifestCatalog> {
        let Some(api_key) = config.mdblist_key() else {
            warn!(catalog_id = %choice.id, "MDBList catalog configured without a key, skipping");
            return None;
        };
        let list_id = choice.id.split('_').nth(1).filter(|id| !id.is_empty())?;

        let genres = match self.gateways.lists.list_items(list_id, api_key).await {
            Ok(items) => {
                let mut genres: Vec<String> = items
                    .into_all()
                    .iter()
                    .filter(|item| mdblist_media(item) == Some(choice.media_type))
                    .flat_map(mdblist_genres)
                    .collect();
                genres.sort();
                genres.dedup();
                genres
            }
            Err(e) => {
                warn!(list_id, error = %e, "MDBList genres unavailable");
                Vec::new()
            }
        };

        Some(ManifestCatalog {
            id: choice.id.clone(),
            media_type: choice.media_type,
            name: choice.name.clone().unwrap_or_else(|| "MDBList".into()),
            page_size: Some(PAGE_SIZE as u32),
            extra: vec![
                ExtraField {
                    options: Some(genres),
                    is_required: Some(false),
                    ..ExtraField::named("genre")
                },
                ExtraField::named("skip"),
            ],
            show_in_home: Some(choice.show_in_home),
        })
    }
}

fn builtin_catalog(
    choice: &CatalogChoice,
    def: &CatalogDef,
    config: &UserConfig,
    options: &CatalogOptions,
) -> ManifestCatalog {
    let mut extra = Vec::new();
    if def.supports("genre") {
        let values = match def.name_key {
            "year" => options.years.clone(),
            "language" => options.languages.clone(),
            _ => {
                let genres = match choice.media_type {
                    MediaType::Movie => &options.movie_genres,
                    MediaType::Series => &options.series_genres,
                };
                let mut values = Vec::with_capacity(genres.len() + 1);
                if !choice.show_in_home {
                    values.push(TOP_OPTION.to_string());
                }
                values.extend(genres.iter().cloned());
                values
            }
        };
        extra.push(ExtraField {
            options: Some(values),
            is_required: Some(!choice.show_in_home),
            ..ExtraField::named("genre")
        });
    }
    if def.supports("search") {
        extra.push(ExtraField::named("search"));
    }
    if def.supports("skip") {
        extra.push(ExtraField::named("skip"));
    }

    let label = translate(&config.language, def.name_key).unwrap_or(def.display_name);
    ManifestCatalog {
        id: choice.id.clone(),
        media_type: choice.media_type,
        name: format!("{}{label}", prefix(config)),
        page_size: Some(PAGE_SIZE as u32),
        extra,
        show_in_home: Some(choice.show_in_home),
    }
}

fn prefix(config: &UserConfig) -> &'static str {
    if config.tmdb_prefix { TMDB_PREFIX } else { "" }
}

/// Built-in catalogs for both media types, shown on the home board.
fn default_catalogs() -> Vec<CatalogChoice> {
    DEFAULT_CATALOGS
        .iter()
        .flat_map(|(key, _)| {
            [MediaType::Movie, MediaType::Series].map(|media| CatalogChoice {
                id: format!("tmdb.{key}"),
                media_type: media,
                name: None,
                enabled: true,
                show_in_home: true,
            })
        })
        .collect()
}

/// Current year first, back `YEARS_BACK` years.
fn year_options(current: i32) -> Vec<String> {
    (current - YEARS_BACK..=current)
        .rev()
        .map(|y| y.to_string())
        .collect()
}

fn sorted_names(genres: &[Genre]) -> Vec<String> {
    let mut names: Vec<String> = genres.iter().map(|g| g.name.clone()).collect();
    names.sort();
    names
}

/// Language names with the user's own language first, the rest sorted.
fn language_options(language: &str, languages: &[LanguageInfo]) -> Vec<String> {
    let own = primary_subtag(language);
    let mut first = None;
    let mut rest: Vec<String> = Vec::with_capacity(languages.len());
    for lang in languages {
        let name = lang.english_name.trim();
        if name.is_empty() {
            continue;
        }
        if first.is_none() && lang.iso_639_1 == own {
            first = Some(name.to_string());
        } else {
            rest.push(name.to_string());
        }
    }
    rest.sort();
    rest.dedup();
    if let Some(first) = &first {
        rest.retain(|n| n != first);
    }
    first.into_iter().chain(rest).collect()
}

fn settings_summary(config: &UserConfig, catalog_count: usize) -> String {
    let on_off = |enabled: bool| if enabled { "Enabled" } else { "Disabled" };
    [
        format!("Language: {}", config.language),
        format!(
            "MDBList: {}",
            if config.mdblist_key().is_some() { "Connected" } else { "Not Connected" }
        ),
        format!("IMDb Integration: {}", on_off(config.provide_imdb_id)),
        format!("RPDB Integration: {}", on_off(config.rpdb_key().is_some())),
        format!("Search: {}", on_off(config.search_enabled)),
        format!("Active Catalogs: {catalog_count}"),
    ]
    .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_cover_twenty_back() {
        let years = year_options(2026);
        assert_eq!(years.len(), 21);
        assert_eq!(years.first().map(String::as_str), Some("2026"));
        assert_eq!(years.last().map(String::as_str), Some("2006"));
    }

    #[test]
    fn own_language_leads_the_options() {
        let lang = |code: &str, name: &str| LanguageInfo {
            iso_639_1: code.into(),
            english_name: name.into(),
            name: None,
        };
        let languages = vec![
            lang("ko", "Korean"),
            lang("de", "German"),
            lang("xx", ""),
            lang("fr", "French"),
        ];
        assert_eq!(
            language_options("fr-FR", &languages),
            vec!["French", "German", "Korean"]
        );
        assert_eq!(
            language_options("ja-JP", &languages),
            vec!["French", "German", "Korean"]
        );
    }

    #[test]
    fn defaults_pair_every_builtin_with_both_types() {
        let defaults = default_catalogs();
        assert_eq!(defaults.len(), 6);
        assert!(defaults.iter().all(|c| c.enabled && c.show_in_home));
        assert_eq!(defaults[0].id, "tmdb.top");
        assert_eq!(defaults[1].media_type, MediaType::Series);
    }

    #[test]
    fn builtin_catalog_genre_options() {
        let options = CatalogOptions {
            years: vec!["2026".into()],
            movie_genres: vec!["Action".into()],
            series_genres: vec!["Drama".into()],
            languages: vec!["English".into()],
        };
        let config = UserConfig {
            language: "de-DE".into(),
            tmdb_prefix: true,
            ..UserConfig::default()
        };
        let choice = CatalogChoice {
            id: "tmdb.top".into(),
            media_type: MediaType::Series,
            name: None,
            enabled: true,
            show_in_home: false,
        };
        let def = catalog_definition("tmdb.top").unwrap();
        let catalog = builtin_catalog(&choice, &def, &config, &options);

        assert_eq!(catalog.name, "TMDB - Beliebt");
        assert_eq!(catalog.page_size, Some(20));
        let genre = &catalog.extra[0];
        assert_eq!(genre.options.as_deref(), Some(&["Top".to_string(), "Drama".to_string()][..]));
        assert_eq!(genre.is_required, Some(true));
        assert_eq!(catalog.extra[1].name, "skip");
    }
}
