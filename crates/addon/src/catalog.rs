use chrono::Datelike;
use futures::StreamExt;
use stremeta_core::stremio::{CatalogResponse, MetaPreview};
use stremeta_core::{AddonError, MediaType, UserConfig};
use stremeta_metadata::models::MdbListItem;
use tracing::{debug, info, warn};

use crate::Addon;
use crate::normalize::{listed_title, mdblist_genres, mdblist_media, mdblist_preview};
use crate::params::{Lookups, build_discover_params};
use crate::resolver::{CatalogRequest, FilterKind, Provider, resolve};

/// Items per catalog page, for lists paged locally.
pub const PAGE_SIZE: usize = 20;

impl Addon {
    /// One page of a catalog.
    ///
    /// `genre` carries the catalog's extra argument: a genre name, a year,
    /// a language name, or the query of a search catalog.
    pub async fn catalog(
        &self,
        media: MediaType,
        language: &str,
        page: u32,
        id: &str,
        genre: Option<&str>,
        config: &UserConfig,
    ) -> Result<CatalogResponse, AddonError> {
        let request = resolve(id, media, page, genre, config)?;
        debug!(catalog_id = %id, %media, page = request.page, "catalog request");

        match (&request.provider, &request.filter) {
            (Provider::MdbList, FilterKind::MdbList { list_id, list_media }) => {
                self.mdblist_catalog(&request, list_id, *list_media, language, config)
                    .await
            }
            (_, FilterKind::Search) => match request.genre.as_deref() {
                Some(query) => self.search(media, language, query, request.page, config).await,
                None => Err(AddonError::BadRequest(
                    "search catalog needs a query".into(),
                )),
            },
            _ => Ok(self.discover_catalog(&request, language, config).await),
        }
    }

    /// Free-text search over TMDB titles of one media kind.
    pub async fn search(
        &self,
        media: MediaType,
        language: &str,
        query: &str,
        page: u32,
        config: &UserConfig,
    ) -> Result<CatalogResponse, AddonError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AddonError::BadRequest("empty search query".into()));
        }

        let tmdb = self.tmdb_for(config);
        let genres = self.genre_list(tmdb.as_ref(), media, language).await;
        match tmdb
            .search(media, query, language, page.max(1), config.include_adult)
            .await
        {
            Ok(results) => Ok(CatalogResponse {
                metas: results
                    .results
                    .iter()
                    .map(|item| listed_title(item, media, &genres))
                    .collect(),
                available_genres: None,
            }),
            Err(e) => {
                warn!(%media, error = %e, "search failed, returning no results");
                Ok(CatalogResponse::empty())
            }
        }
    }

    async fn discover_catalog(
        &self,
        request: &CatalogRequest,
        language: &str,
        config: &UserConfig,
    ) -> CatalogResponse {
        let media = request.media_type;
        let tmdb = self.tmdb_for(config);
        let genres = self.genre_list(tmdb.as_ref(), media, language).await;
        let languages = match request.filter {
            FilterKind::Language => self.language_list(tmdb.as_ref()).await,
            _ => Vec::new(),
        };

        let params = build_discover_params(
            request,
            language,
            config,
            Lookups {
                genres: &genres,
                languages: &languages,
                current_year: chrono::Utc::now().year(),
            },
        );

        match tmdb.discover(media, &params).await {
            Ok(results) => CatalogResponse {
                metas: results
                    .results
                    .iter()
                    .map(|item| listed_title(item, media, &genres))
                    .collect(),
                available_genres: None,
            },
            Err(e) => {
                warn!(catalog_id = %request.raw_id, error = %e, "discover failed, returning empty catalog");
                CatalogResponse::empty()
            }
        }
    }

    async fn mdblist_catalog(
        &self,
        request: &CatalogRequest,
        list_id: &str,
        list_media: Option<MediaType>,
        language: &str,
        config: &UserConfig,
    ) -> Result<CatalogResponse, AddonError> {
        let api_key = config
            .mdblist_key()
            .ok_or_else(|| AddonError::Config("MDBList API key missing".into()))?;

        let items = match self.gateways.lists.list_items(list_id, api_key).await {
            Ok(items) => items.into_all(),
            Err(e) => {
                warn!(list_id, error = %e, "MDBList fetch failed, returning empty catalog");
                return Ok(CatalogResponse::empty());
            }
        };

        let items: Vec<MdbListItem> = items
            .into_iter()
            .filter(|item| list_media.is_none_or(|m| mdblist_media(item) == Some(m)))
            .collect();
        let available_genres = available_genres(&items);

        let wanted_genre = request.genre.as_deref();
        let previews: Vec<MetaPreview> = items
            .iter()
            .filter(|item| {
                wanted_genre.is_none_or(|g| {
                    mdblist_genres(item)
                        .iter()
                        .any(|label| label.eq_ignore_ascii_case(g))
                })
            })
            .filter_map(|item| mdblist_preview(item, list_media))
            .skip((request.page as usize - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        info!(list_id, total = items.len(), page_items = previews.len(), "MDBList catalog");

        let metas = futures::stream::iter(previews)
            .map(|preview| self.enrich_list_item(preview, language, config))
            .buffered(self.settings.list_concurrency.max(1))
            .filter_map(|meta| async move { meta })
            .collect::<Vec<_>>()
            .await;

        Ok(CatalogResponse {
            metas,
            available_genres: Some(available_genres),
        })
    }

    /// Full detail for a list entry with a TMDB id; `None` drops the entry.
    /// IMDb-only entries keep their basic preview.
    async fn enrich_list_item(
        &self,
        preview: MetaPreview,
        language: &str,
        config: &UserConfig,
    ) -> Option<MetaPreview> {
        let Some(tmdb_id) = preview
            .id
            .strip_prefix("tmdb:")
            .and_then(|id| id.parse::<u64>().ok())
        else {
            return Some(preview);
        };

        let tmdb = self.tmdb_for(config);
        match self
            .detail(tmdb.as_ref(), preview.media_type, tmdb_id, language, config)
            .await
        {
            Ok(meta) => {
                let id = match (&meta.imdb_id, config.provide_imdb_id) {
                    (Some(imdb), true) => imdb.clone(),
                    _ => meta.id.clone(),
                };
                Some(meta.preview(id))
            }
            Err(e) => {
                warn!(tmdb_id, error = %e, "dropping list item without metadata");
                None
            }
        }
    }
}

/// Distinct display genres across the list, sorted.
fn available_genres(items: &[MdbListItem]) -> Vec<String> {
    let mut genres: Vec<String> = items.iter().flat_map(mdblist_genres).collect();
    genres.sort();
    genres.dedup();
    genres
}
