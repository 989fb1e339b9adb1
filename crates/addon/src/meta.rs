use futures::future::join_all;
use stremeta_core::stremio::{AppExtras, BehaviorHints, Meta, MetaResponse, Video};
use stremeta_core::{AddonError, MediaType, UserConfig};
use stremeta_metadata::MetadataError;
use stremeta_metadata::models::{TitleDetails, VideoList};
use stremeta_metadata::provider::{LogoRequest, TmdbApi};
use tracing::{debug, warn};

use crate::Addon;
use crate::cache::MetaCacheKey;
use crate::normalize::{
    LinkSource, NO_RATING, backdrop_url, cast, clean_logo, countries, crew_with_job,
    detail_rating, episode_video, format_runtime, links, poster_url, released_iso,
    rpdb_poster_url, series_year, slug, year_of,
};
use crate::trailers::select_trailers;

const FALLBACK_VIDEO_LANGUAGE: &str = "en-US";

/// Identifier a client asks for in a meta request.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetaId {
    Tmdb(u64),
    Imdb(String),
}

fn parse_meta_id(id: &str) -> Result<MetaId, AddonError> {
    if let Some(rest) = id.strip_prefix("tmdb:") {
        let tmdb_id = rest
            .split(':')
            .next()
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| AddonError::BadRequest(format!("malformed TMDB id: {id}")))?;
        return Ok(MetaId::Tmdb(tmdb_id));
    }
    if id.starts_with("tt") {
        let imdb = id.split(':').next().unwrap_or(id);
        return Ok(MetaId::Imdb(imdb.to_string()));
    }
    Err(AddonError::BadRequest(format!("unsupported meta id: {id}")))
}

/// Outcome of the secondary lookups, already settled to plain values.
struct Enrichment {
    poster: Option<String>,
    logo: Option<String>,
    imdb_rating: Option<String>,
    episodes: Vec<Video>,
    videos: VideoList,
}

struct AssemblyContext<'a> {
    media: MediaType,
    tmdb_id: u64,
    imdb_id: Option<String>,
    language: &'a str,
    host_name: &'a str,
}

/// Keep the value of a secondary lookup or fall back to its default.
fn settle<T: Default>(what: &str, tmdb_id: u64, result: Result<T, MetadataError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(tmdb_id, lookup = what, error = %e, "enrichment failed, using default");
            T::default()
        }
    }
}

impl Addon {
    /// Full detail record for `tmdb:<id>` or an IMDb id.
    pub async fn meta(
        &self,
        media: MediaType,
        language: &str,
        id: &str,
        config: &UserConfig,
    ) -> Result<MetaResponse, AddonError> {
        let tmdb = self.tmdb_for(config);
        let tmdb_id = match parse_meta_id(id)? {
            MetaId::Tmdb(tmdb_id) => tmdb_id,
            MetaId::Imdb(imdb) => tmdb
                .find_by_imdb_id(media, &imdb)
                .await?
                .ok_or_else(|| AddonError::NotFound(format!("no TMDB title for {imdb}")))?,
        };

        let meta = self
            .detail(tmdb.as_ref(), media, tmdb_id, language, config)
            .await?;
        Ok(MetaResponse { meta })
    }

    /// Cached detail build. Only the core details fetch can fail it.
    pub(crate) async fn detail(
        &self,
        tmdb: &dyn TmdbApi,
        media: MediaType,
        tmdb_id: u64,
        language: &str,
        config: &UserConfig,
    ) -> Result<Meta, AddonError> {
        let key = MetaCacheKey {
            media,
            language: language.to_string(),
            tmdb_id,
            rpdb_key: config.rpdbkey.clone(),
        };
        if let Some(hit) = self.meta_cache.get(&key).await {
            debug!(tmdb_id, %media, "meta cache hit");
            return Ok(hit);
        }

        let details = tmdb.details(media, tmdb_id, language).await?;
        let imdb_id = details
            .external_ids
            .imdb_id
            .clone()
            .or_else(|| details.imdb_id.clone())
            .filter(|id| !id.is_empty());

        let tmdb_poster = poster_url(details.poster_path.as_deref());
        let rpdb_poster = config
            .rpdb_key()
            .map(|key| rpdb_poster_url(key, media, tmdb_id, language));
        let logo_request = LogoRequest {
            media,
            tmdb_id,
            tvdb_id: details.external_ids.tvdb_id,
            language,
            original_language: details.original_language.as_deref(),
        };

        let (probe, logo, rating, episodes, fallback_videos) = tokio::join!(
            async {
                match &rpdb_poster {
                    Some(url) => self.probe_poster(url).await,
                    None => Ok(false),
                }
            },
            self.gateways.logos.logo(&logo_request),
            self.imdb_rating(imdb_id.as_deref(), media),
            self.episodes(tmdb, media, &details, imdb_id.as_deref(), language, config),
            async {
                if details.videos.results.is_empty() {
                    tmdb.videos(media, tmdb_id, FALLBACK_VIDEO_LANGUAGE)
                        .await
                        .map(Some)
                } else {
                    Ok(None)
                }
            },
        );

        let poster = match (settle("poster", tmdb_id, probe), rpdb_poster) {
            (true, Some(url)) => Some(url),
            _ => tmdb_poster,
        };
        let enrichment = Enrichment {
            poster,
            logo: settle("logo", tmdb_id, logo),
            imdb_rating: settle("rating", tmdb_id, rating),
            episodes: settle("episodes", tmdb_id, episodes),
            videos: settle("videos", tmdb_id, fallback_videos)
                .unwrap_or_else(|| details.videos.clone()),
        };

        let meta = assemble(
            &details,
            enrichment,
            &AssemblyContext {
                media,
                tmdb_id,
                imdb_id,
                language,
                host_name: &self.settings.host_name,
            },
        );
        self.meta_cache.insert(key, meta.clone()).await;
        Ok(meta)
    }

    async fn probe_poster(&self, url: &str) -> Result<bool, MetadataError> {
        if let Some(hit) = self.poster_probes.get(&url.to_string()).await {
            return Ok(hit);
        }
        let exists = self.gateways.posters.exists(url).await?;
        self.poster_probes.insert(url.to_string(), exists).await;
        Ok(exists)
    }

    async fn imdb_rating(
        &self,
        imdb_id: Option<&str>,
        media: MediaType,
    ) -> Result<Option<String>, MetadataError> {
        let Some(imdb_id) = imdb_id else {
            return Ok(None);
        };
        let key = imdb_id.to_string();
        if let Some(hit) = self.ratings.get(&key).await {
            return Ok(hit);
        }
        let rating = self.gateways.ratings.imdb_rating(imdb_id, media).await?;
        self.ratings.insert(key, rating.clone()).await;
        Ok(rating)
    }

    /// Every season fetched concurrently. A failed season is skipped; the
    /// lookup only fails when every season did.
    async fn episodes(
        &self,
        tmdb: &dyn TmdbApi,
        media: MediaType,
        details: &TitleDetails,
        imdb_id: Option<&str>,
        language: &str,
        config: &UserConfig,
    ) -> Result<Vec<Video>, MetadataError> {
        if media == MediaType::Movie || details.seasons.is_empty() {
            return Ok(Vec::new());
        }

        let seasons = join_all(
            details
                .seasons
                .iter()
                .map(|s| tmdb.season(details.id, s.season_number, language)),
        )
        .await;

        let mut videos = Vec::new();
        let mut last_error = None;
        let mut fetched = 0;
        for (summary, season) in details.seasons.iter().zip(seasons) {
            match season {
                Ok(season) => {
                    fetched += 1;
                    videos.extend(season.episodes.iter().map(|ep| {
                        episode_video(ep, details.id, imdb_id, config.hide_episode_thumbnails)
                    }));
                }
                Err(e) => {
                    warn!(tmdb_id = details.id, season = summary.season_number, error = %e, "season fetch failed, skipping");
                    last_error = Some(e);
                }
            }
        }

        match (fetched, last_error) {
            (0, Some(e)) => Err(e),
            _ => Ok(videos),
        }
    }
}

fn assemble(details: &TitleDetails, enrichment: Enrichment, ctx: &AssemblyContext<'_>) -> Meta {
    let media = ctx.media;
    let imdb_rating = enrichment
        .imdb_rating
        .filter(|r| !r.is_empty())
        .or_else(|| detail_rating(details.vote_average))
        .unwrap_or_else(|| NO_RATING.to_string());

    let name = match media {
        MediaType::Movie => details.title.as_deref().or(details.name.as_deref()),
        MediaType::Series => details.name.as_deref().or(details.title.as_deref()),
    }
    .unwrap_or_default()
    .to_string();

    let (released, year, runtime, director, writer, status, hints, videos) = match media {
        MediaType::Movie => (
            released_iso(details.release_date.as_deref()),
            year_of(details.release_date.as_deref()),
            details.runtime,
            crew_with_job(&details.credits, "Director"),
            crew_with_job(&details.credits, "Writer"),
            None,
            BehaviorHints {
                default_video_id: Some(
                    ctx.imdb_id
                        .clone()
                        .unwrap_or_else(|| format!("tmdb:{}", ctx.tmdb_id)),
                ),
                has_scheduled_videos: false,
            },
            Vec::new(),
        ),
        MediaType::Series => (
            released_iso(details.first_air_date.as_deref()),
            series_year(
                details.status.as_deref(),
                details.first_air_date.as_deref(),
                details.last_air_date.as_deref(),
            ),
            details
                .episode_run_time
                .first()
                .copied()
                .or_else(|| details.last_episode_to_air.as_ref().and_then(|e| e.runtime))
                .or_else(|| details.next_episode_to_air.as_ref().and_then(|e| e.runtime)),
            Vec::new(),
            details.created_by.iter().map(|p| p.name.clone()).collect(),
            details.status.clone(),
            BehaviorHints {
                default_video_id: None,
                has_scheduled_videos: true,
            },
            enrichment.episodes,
        ),
    };

    let links = links(&LinkSource {
        media,
        title: &name,
        imdb_id: ctx.imdb_id.as_deref(),
        rating: &imdb_rating,
        genres: &details.genres,
        credits: &details.credits,
        host_name: ctx.host_name,
        language: ctx.language,
    });

    Meta {
        id: format!("tmdb:{}", ctx.tmdb_id),
        media_type: media,
        slug: slug(media, &name, ctx.imdb_id.as_deref()),
        imdb_id: ctx.imdb_id.clone(),
        imdb_rating,
        description: details.overview.clone().filter(|o| !o.is_empty()),
        genres: details.genres.iter().map(|g| g.name.clone()).collect(),
        director,
        writer,
        released,
        release_info: year.clone(),
        year,
        runtime: format_runtime(runtime),
        country: countries(&details.production_countries),
        status,
        poster: enrichment.poster,
        background: backdrop_url(details.backdrop_path.as_deref()),
        logo: clean_logo(enrichment.logo),
        videos,
        trailers: select_trailers(&enrichment.videos.results),
        links,
        behavior_hints: hints,
        app_extras: AppExtras {
            cast: cast(&details.credits),
        },
        name,
    }
}
