use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use stremeta_addon::cache::ManualClock;
use stremeta_addon::{Addon, Gateways, ServiceConfig};
use stremeta_core::{AddonError, MediaType, UserConfig};
use stremeta_metadata::MetadataError;
use stremeta_metadata::models::{
    ExternalIds, Genre, LanguageInfo, ListedTitle, MdbListItem, MdbListItems, ResultsPage,
    SeasonDetails, SeasonSummary, TitleDetails, EpisodeDetails, VideoEntry, VideoList,
};
use stremeta_metadata::provider::{
    ImageProbe, ListProvider, LogoProvider, LogoRequest, RatingProvider, TmdbApi,
};
use stremeta_metadata::query::QueryParams;

/// TMDB stand-in that echoes discover filters into its results.
#[derive(Default)]
struct FakeTmdb {
    discover_calls: AtomicUsize,
    details_calls: AtomicUsize,
    season_calls: AtomicUsize,
    video_languages: Mutex<Vec<String>>,
    last_discover: Mutex<Option<QueryParams>>,
    fail_discover: bool,
    fail_videos: bool,
}

/// Titles whose details already carry a localized trailer.
const LOCALIZED_TRAILER_ID: u64 = 603;

fn youtube_trailer(key: &str) -> VideoEntry {
    VideoEntry {
        key: Some(key.into()),
        name: Some("Official Trailer".into()),
        site: Some("YouTube".into()),
        kind: Some("Trailer".into()),
        official: Some(true),
        ..VideoEntry::default()
    }
}

#[async_trait]
impl TmdbApi for FakeTmdb {
    async fn discover(
        &self,
        media: MediaType,
        params: &QueryParams,
    ) -> Result<ResultsPage, MetadataError> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_discover.lock().unwrap() = Some(params.clone());
        if self.fail_discover {
            return Err(MetadataError::Provider("HTTP 503".into()));
        }

        let year = params
            .rendered("primary_release_year")
            .or_else(|| params.rendered("first_air_date_year"))
            .unwrap_or_else(|| "2020".into());
        let date = Some(format!("{year}-06-01"));
        let results = (1..=3)
            .map(|id| ListedTitle {
                id,
                title: (media == MediaType::Movie).then(|| format!("Movie {id}")),
                name: (media == MediaType::Series).then(|| format!("Show {id}")),
                genre_ids: vec![28, 10_000],
                poster_path: Some(format!("/poster{id}.jpg")),
                release_date: date.clone(),
                first_air_date: date.clone(),
                vote_average: Some(7.26),
                ..ListedTitle::default()
            })
            .collect();
        Ok(ResultsPage {
            page: 1,
            results,
            total_pages: 1,
        })
    }

    async fn search(
        &self,
        _media: MediaType,
        query: &str,
        _language: &str,
        _page: u32,
        _include_adult: bool,
    ) -> Result<ResultsPage, MetadataError> {
        Ok(ResultsPage {
            page: 1,
            results: vec![ListedTitle {
                id: 77,
                title: Some(query.to_string()),
                ..ListedTitle::default()
            }],
            total_pages: 1,
        })
    }

    async fn details(
        &self,
        media: MediaType,
        tmdb_id: u64,
        _language: &str,
    ) -> Result<TitleDetails, MetadataError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if tmdb_id == 404 {
            return Err(MetadataError::NotFound);
        }
        let label = format!("Title {tmdb_id}");
        Ok(TitleDetails {
            id: tmdb_id,
            title: (media == MediaType::Movie).then(|| label.clone()),
            name: (media == MediaType::Series).then(|| label.clone()),
            release_date: Some("2016-11-11".into()),
            first_air_date: Some("2016-11-11".into()),
            runtime: Some(116),
            poster_path: Some("/p.jpg".into()),
            genres: vec![Genre { id: 18, name: "Drama".into() }],
            videos: VideoList {
                results: if tmdb_id == LOCALIZED_TRAILER_ID {
                    vec![youtube_trailer("localized")]
                } else {
                    Vec::new()
                },
            },
            external_ids: ExternalIds {
                imdb_id: Some(format!("tt{tmdb_id:07}")),
                tvdb_id: None,
            },
            seasons: match media {
                MediaType::Movie => Vec::new(),
                MediaType::Series => vec![
                    SeasonSummary { season_number: 1, episode_count: Some(2) },
                    SeasonSummary { season_number: 2, episode_count: Some(2) },
                ],
            },
            ..TitleDetails::default()
        })
    }

    async fn videos(
        &self,
        _media: MediaType,
        _tmdb_id: u64,
        language: &str,
    ) -> Result<VideoList, MetadataError> {
        self.video_languages.lock().unwrap().push(language.to_string());
        if self.fail_videos {
            return Err(MetadataError::Network("connection reset".into()));
        }
        let results = if language == "en-US" {
            vec![youtube_trailer("english")]
        } else {
            Vec::new()
        };
        Ok(VideoList { results })
    }

    async fn season(
        &self,
        _tmdb_id: u64,
        season_number: u32,
        _language: &str,
    ) -> Result<SeasonDetails, MetadataError> {
        self.season_calls.fetch_add(1, Ordering::SeqCst);
        if season_number == 2 {
            return Err(MetadataError::Provider("HTTP 500".into()));
        }
        Ok(SeasonDetails {
            season_number,
            episodes: (1..=2)
                .map(|n| EpisodeDetails {
                    episode_number: n,
                    season_number,
                    name: Some(format!("Episode {n}")),
                    overview: None,
                    air_date: Some("2016-11-11".into()),
                    still_path: Some("/still.jpg".into()),
                })
                .collect(),
        })
    }

    async fn genres(&self, _media: MediaType, _language: &str) -> Result<Vec<Genre>, MetadataError> {
        Ok(vec![
            Genre { id: 28, name: "Action".into() },
            Genre { id: 18, name: "Drama".into() },
        ])
    }

    async fn languages(&self) -> Result<Vec<LanguageInfo>, MetadataError> {
        Ok(vec![
            LanguageInfo {
                iso_639_1: "en".into(),
                english_name: "English".into(),
                name: Some("English".into()),
            },
            LanguageInfo {
                iso_639_1: "ko".into(),
                english_name: "Korean".into(),
                name: None,
            },
        ])
    }

    async fn find_by_imdb_id(
        &self,
        _media: MediaType,
        imdb_id: &str,
    ) -> Result<Option<u64>, MetadataError> {
        Ok((imdb_id == "tt0137523").then_some(550))
    }
}

#[derive(Default)]
struct FakeLists {
    calls: AtomicUsize,
    items: MdbListItems,
}

#[async_trait]
impl ListProvider for FakeLists {
    async fn list_items(
        &self,
        _list_id: &str,
        _api_key: &str,
    ) -> Result<MdbListItems, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }
}

struct FakeLogos;

#[async_trait]
impl LogoProvider for FakeLogos {
    async fn logo(&self, _request: &LogoRequest<'_>) -> Result<Option<String>, MetadataError> {
        Err(MetadataError::Network("timeout".into()))
    }
}

#[derive(Default)]
struct FakeRatings {
    calls: AtomicUsize,
}

#[async_trait]
impl RatingProvider for FakeRatings {
    async fn imdb_rating(
        &self,
        _imdb_id: &str,
        _media: MediaType,
    ) -> Result<Option<String>, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some("7.9".into()))
    }
}

/// Rating-poster check; answers "exists" unless told otherwise.
#[derive(Default)]
struct FakeProbe {
    calls: AtomicUsize,
    missing: bool,
    broken: bool,
}

#[async_trait]
impl ImageProbe for FakeProbe {
    async fn exists(&self, _url: &str) -> Result<bool, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(MetadataError::Network("timeout".into()));
        }
        Ok(!self.missing)
    }
}

struct Harness {
    addon: Addon,
    tmdb: Arc<FakeTmdb>,
    lists: Arc<FakeLists>,
    ratings: Arc<FakeRatings>,
    probe: Arc<FakeProbe>,
    clock: Arc<ManualClock>,
}

fn harness_with(tmdb: FakeTmdb, lists: FakeLists) -> Harness {
    harness_with_probe(tmdb, lists, FakeProbe::default())
}

fn harness_with_probe(tmdb: FakeTmdb, lists: FakeLists, probe: FakeProbe) -> Harness {
    stremeta_core::telemetry::init_tracing();

    let tmdb = Arc::new(tmdb);
    let lists = Arc::new(lists);
    let ratings = Arc::new(FakeRatings::default());
    let probe = Arc::new(probe);
    let clock = Arc::new(ManualClock::new());

    let gateways = Gateways {
        tmdb: tmdb.clone(),
        lists: lists.clone(),
        logos: Arc::new(FakeLogos),
        ratings: ratings.clone(),
        posters: probe.clone(),
    };
    let settings = ServiceConfig {
        tmdb_api_key: "test".into(),
        host_name: "https://addon.example".into(),
        list_concurrency: 2,
        ..ServiceConfig::default()
    };

    Harness {
        addon: Addon::new(gateways, settings, clock.clone()),
        tmdb,
        lists,
        ratings,
        probe,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(FakeTmdb::default(), FakeLists::default())
}

fn list_item(id: Option<u64>, tag: &str, title: &str, poster: bool, genres: &[&str]) -> MdbListItem {
    MdbListItem {
        id,
        imdb_id: None,
        tvdb_id: None,
        title: Some(title.into()),
        mediatype: Some(tag.into()),
        release_year: Some(2016),
        poster: poster.then(|| format!("https://img/{title}.jpg")),
        genre: genres.iter().map(|g| Some(g.to_string())).collect(),
    }
}

fn with_mdblist_key() -> UserConfig {
    UserConfig {
        mdblistkey: Some("list-key".into()),
        ..UserConfig::default()
    }
}

#[tokio::test]
async fn year_catalog_filters_discover_by_year() {
    let h = harness();
    let response = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "tmdb.year", Some("2015"), &UserConfig::default())
        .await
        .unwrap();

    assert_eq!(h.tmdb.discover_calls.load(Ordering::SeqCst), 1);
    let params = h.tmdb.last_discover.lock().unwrap().clone().unwrap();
    assert_eq!(params.rendered("primary_release_year").as_deref(), Some("2015"));
    assert_eq!(params.rendered("vote_count.gte").as_deref(), Some("10"));

    assert_eq!(response.metas.len(), 3);
    assert!(response.metas.iter().all(|m| m.year == "2015"));
    assert_eq!(response.metas[0].id, "tmdb:1");
    assert_eq!(response.metas[0].genres, vec!["Action", "Unknown"]);
    assert_eq!(response.metas[0].imdb_rating, "7.3");
    assert!(response.available_genres.is_none());
}

#[tokio::test]
async fn mdblist_without_key_fails_before_any_fetch() {
    let h = harness();
    let err = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "mdblist_42_movie", None, &UserConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AddonError::Config(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(h.lists.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.tmdb.discover_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_streaming_provider_is_not_found() {
    let h = harness();
    let err = h
        .addon
        .catalog(MediaType::Series, "en-US", 1, "streaming.zzz", None, &UserConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AddonError::NotFound(_)));
    assert_eq!(h.tmdb.discover_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn streaming_catalog_passes_provider_filters() {
    let h = harness();
    h.addon
        .catalog(MediaType::Movie, "en-US", 2, "streaming.hlu", Some("Drama"), &UserConfig::default())
        .await
        .unwrap();
    let params = h.tmdb.last_discover.lock().unwrap().clone().unwrap();
    assert_eq!(params.rendered("with_watch_providers").as_deref(), Some("15"));
    assert_eq!(params.rendered("watch_region").as_deref(), Some("US"));
    assert_eq!(params.rendered("with_genres").as_deref(), Some("18"));
    assert_eq!(params.rendered("page").as_deref(), Some("2"));
}

#[tokio::test]
async fn language_catalog_resolves_language_names() {
    let h = harness();
    h.addon
        .catalog(MediaType::Movie, "en-US", 1, "tmdb.language", Some("Korean"), &UserConfig::default())
        .await
        .unwrap();
    let params = h.tmdb.last_discover.lock().unwrap().clone().unwrap();
    assert_eq!(params.rendered("with_original_language").as_deref(), Some("ko"));
}

#[tokio::test]
async fn discover_failure_degrades_to_empty_catalog() {
    let h = harness_with(
        FakeTmdb {
            fail_discover: true,
            ..FakeTmdb::default()
        },
        FakeLists::default(),
    );
    let response = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "tmdb.top", None, &UserConfig::default())
        .await
        .unwrap();
    assert!(response.metas.is_empty());
}

#[tokio::test]
async fn meta_is_cached_until_ttl_elapses() {
    let h = harness();
    let config = UserConfig::default();

    let first = h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &config).await.unwrap();
    let second = h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &config).await.unwrap();
    assert_eq!(h.tmdb.details_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    h.clock.advance(Duration::from_secs(3599));
    h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &config).await.unwrap();
    assert_eq!(h.tmdb.details_calls.load(Ordering::SeqCst), 1);

    h.clock.advance(Duration::from_secs(1));
    h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &config).await.unwrap();
    assert_eq!(h.tmdb.details_calls.load(Ordering::SeqCst), 2);
    // ratings outlive the detail cache
    assert_eq!(h.ratings.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cache_key_includes_language_and_rating_key() {
    let h = harness();
    let plain = UserConfig::default();
    let rated = UserConfig {
        rpdbkey: Some("t1-key".into()),
        ..UserConfig::default()
    };

    h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &plain).await.unwrap();
    h.addon.meta(MediaType::Movie, "de-DE", "tmdb:550", &plain).await.unwrap();
    h.addon.meta(MediaType::Movie, "en-US", "tmdb:550", &rated).await.unwrap();
    assert_eq!(h.tmdb.details_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn movie_meta_survives_failed_enrichment() {
    let h = harness_with(
        FakeTmdb {
            fail_videos: true,
            ..FakeTmdb::default()
        },
        FakeLists::default(),
    );
    let response = h
        .addon
        .meta(MediaType::Movie, "en-US", "tmdb:550", &UserConfig::default())
        .await
        .unwrap();
    let meta = response.meta;

    // logo and fallback videos both failed upstream
    assert_eq!(meta.logo, None);
    assert!(meta.trailers.is_empty());
    assert_eq!(meta.name, "Title 550");
    assert_eq!(meta.imdb_id.as_deref(), Some("tt0000550"));
    assert_eq!(meta.imdb_rating, "7.9");
    assert_eq!(meta.runtime, "1h56min");
    assert_eq!(meta.poster.as_deref(), Some("https://image.tmdb.org/t/p/w500/p.jpg"));
    assert_eq!(h.probe.calls.load(Ordering::SeqCst), 0);

    let json: Value = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["imdbRating"], "7.9");
    assert_eq!(json["behaviorHints"]["defaultVideoId"], "tt0000550");
    assert!(json.get("videos").is_none());
}

#[tokio::test]
async fn rating_poster_is_probed_once_and_preferred() {
    let h = harness();
    let config = UserConfig {
        rpdbkey: Some("t2-key".into()),
        ..UserConfig::default()
    };

    let meta = h.addon.meta(MediaType::Movie, "pt-BR", "tmdb:550", &config).await.unwrap().meta;
    assert_eq!(
        meta.poster.as_deref(),
        Some("https://api.ratingposterdb.com/t2-key/tmdb/poster-default/movie-550.jpg?fallback=true&lang=pt")
    );

    // a second language misses the meta cache but reuses the probe
    h.addon.meta(MediaType::Movie, "pt-BR", "tmdb:551", &config).await.unwrap();
    h.addon.meta(MediaType::Movie, "pt-PT", "tmdb:550", &config).await.unwrap();
    assert_eq!(h.probe.calls.load(Ordering::SeqCst), 2);
}

fn rated_poster_config() -> UserConfig {
    UserConfig {
        rpdbkey: Some("t1-key".into()),
        ..UserConfig::default()
    }
}

const TMDB_POSTER: &str = "https://image.tmdb.org/t/p/w500/p.jpg";

#[tokio::test]
async fn missing_rating_poster_keeps_tmdb_poster() {
    let h = harness_with_probe(
        FakeTmdb::default(),
        FakeLists::default(),
        FakeProbe {
            missing: true,
            ..FakeProbe::default()
        },
    );
    let meta = h
        .addon
        .meta(MediaType::Movie, "en-US", "tmdb:550", &rated_poster_config())
        .await
        .unwrap()
        .meta;

    assert_eq!(h.probe.calls.load(Ordering::SeqCst), 1);
    assert_eq!(meta.poster.as_deref(), Some(TMDB_POSTER));
}

#[tokio::test]
async fn failed_rating_poster_check_keeps_tmdb_poster() {
    let h = harness_with_probe(
        FakeTmdb::default(),
        FakeLists::default(),
        FakeProbe {
            broken: true,
            ..FakeProbe::default()
        },
    );
    let meta = h
        .addon
        .meta(MediaType::Movie, "en-US", "tmdb:550", &rated_poster_config())
        .await
        .unwrap()
        .meta;

    assert_eq!(h.probe.calls.load(Ordering::SeqCst), 1);
    assert_eq!(meta.poster.as_deref(), Some(TMDB_POSTER));
    assert_eq!(meta.name, "Title 550");
}

#[tokio::test]
async fn empty_localized_videos_fall_back_to_english() {
    let h = harness();
    let meta = h
        .addon
        .meta(MediaType::Movie, "de-DE", "tmdb:550", &UserConfig::default())
        .await
        .unwrap()
        .meta;

    assert_eq!(*h.tmdb.video_languages.lock().unwrap(), vec!["en-US".to_string()]);
    assert_eq!(meta.trailers.len(), 1);
    assert_eq!(meta.trailers[0].external_url, "https://www.youtube.com/watch?v=english");
}

#[tokio::test]
async fn localized_videos_skip_the_english_fetch() {
    let h = harness();
    let meta = h
        .addon
        .meta(MediaType::Movie, "de-DE", "tmdb:603", &UserConfig::default())
        .await
        .unwrap()
        .meta;

    assert!(h.tmdb.video_languages.lock().unwrap().is_empty());
    assert_eq!(meta.trailers.len(), 1);
    assert_eq!(meta.trailers[0].external_url, "https://www.youtube.com/watch?v=localized");
}

#[tokio::test]
async fn series_meta_skips_failed_seasons() {
    let h = harness();
    let config = UserConfig {
        hide_episode_thumbnails: true,
        ..UserConfig::default()
    };
    let meta = h
        .addon
        .meta(MediaType::Series, "en-US", "tmdb:1396", &config)
        .await
        .unwrap()
        .meta;

    assert_eq!(h.tmdb.season_calls.load(Ordering::SeqCst), 2);
    assert_eq!(meta.videos.len(), 2);
    assert_eq!(meta.videos[0].id, "tt0001396:1:1");
    assert!(meta.videos.iter().all(|v| v.thumbnail.is_none()));
    assert!(meta.behavior_hints.has_scheduled_videos);
}

#[tokio::test]
async fn imdb_ids_resolve_through_find() {
    let h = harness();
    let meta = h
        .addon
        .meta(MediaType::Movie, "en-US", "tt0137523", &UserConfig::default())
        .await
        .unwrap()
        .meta;
    assert_eq!(meta.id, "tmdb:550");

    let err = h
        .addon
        .meta(MediaType::Movie, "en-US", "tt9999999", &UserConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AddonError::NotFound(_)));
}

#[tokio::test]
async fn missing_details_propagate() {
    let h = harness();
    let err = h
        .addon
        .meta(MediaType::Movie, "en-US", "tmdb:404", &UserConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

fn sample_list() -> FakeLists {
    FakeLists {
        calls: AtomicUsize::new(0),
        items: MdbListItems {
            movies: vec![
                list_item(Some(1), "movie", "Arrival", true, &["science-fiction", "drama"]),
                list_item(Some(2), "movie", "No Poster", false, &["drama"]),
                list_item(None, "movie", "No Id", true, &["drama"]),
                list_item(Some(404), "movie", "Gone", true, &["drama"]),
                // filed under movies but tagged as a show
                list_item(Some(3), "show", "Mislabeled", true, &["comedy"]),
            ],
            shows: vec![list_item(Some(4), "show", "Dark", true, &["thriller"])],
        },
    }
}

#[tokio::test]
async fn mdblist_catalog_filters_by_tag_and_drops_invalid_items() {
    let h = harness_with(FakeTmdb::default(), sample_list());
    let response = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "mdblist_42_movie", None, &with_mdblist_key())
        .await
        .unwrap();

    let ids: Vec<&str> = response.metas.iter().map(|m| m.id.as_str()).collect();
    // 404 has no details and is dropped after enrichment
    assert_eq!(ids, vec!["tmdb:1"]);
    assert_eq!(response.metas[0].name, "Title 1");
    assert_eq!(
        response.available_genres,
        Some(vec!["Drama".to_string(), "Science Fiction".to_string()])
    );
    assert_eq!(h.lists.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mdblist_genre_filter_and_imdb_ids() {
    let h = harness_with(FakeTmdb::default(), sample_list());
    let config = UserConfig {
        provide_imdb_id: true,
        ..with_mdblist_key()
    };

    let response = h
        .addon
        .catalog(MediaType::Series, "en-US", 1, "mdblist_42", Some("Thriller"), &config)
        .await
        .unwrap();
    assert_eq!(response.metas.len(), 1);
    assert_eq!(response.metas[0].id, "tt0000004");
    assert_eq!(response.metas[0].media_type, MediaType::Series);

    let empty_page = h
        .addon
        .catalog(MediaType::Series, "en-US", 2, "mdblist_42", None, &config)
        .await
        .unwrap();
    assert!(empty_page.metas.is_empty());
}

#[tokio::test]
async fn search_catalog_requires_a_query() {
    let h = harness();
    let err = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "tmdb.search", None, &UserConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AddonError::BadRequest(_)));

    let found = h
        .addon
        .catalog(MediaType::Movie, "en-US", 1, "tmdb.search", Some("Heat"), &UserConfig::default())
        .await
        .unwrap();
    assert_eq!(found.metas[0].name, "Heat");
}

#[tokio::test]
async fn manifest_lists_defaults_and_search() {
    let h = harness();
    let manifest = h.addon.manifest(&UserConfig::default()).await;

    assert_eq!(manifest.catalogs.len(), 8);
    assert_eq!(manifest.id_prefixes, vec!["tmdb:"]);
    assert_eq!(manifest.logo.as_deref(), Some("https://addon.example/logo.png"));
    assert!(manifest.description.contains("Active Catalogs: 8"));

    let top = &manifest.catalogs[0];
    assert_eq!(top.id, "tmdb.top");
    assert_eq!(top.name, "Popular");
    assert_eq!(
        top.extra[0].options.as_deref(),
        Some(&["Action".to_string(), "Drama".to_string()][..])
    );
    assert_eq!(top.extra[0].is_required, Some(false));

    let search = manifest.catalogs.last().unwrap();
    assert_eq!(search.id, "tmdb.search");
    assert_eq!(search.media_type, MediaType::Series);

    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["behaviorHints"]["configurable"], true);
    assert_eq!(json["catalogs"][0]["pageSize"], 20);
}

#[tokio::test]
async fn manifest_builds_mdblist_catalogs_from_the_list() {
    let h = harness_with(FakeTmdb::default(), sample_list());
    let config = UserConfig::parse(
        r#"{"language":"nl-NL","mdblistkey":"k","provideImdbId":"true","searchEnabled":false,
            "catalogs":[{"id":"mdblist_42_movie","type":"movie","name":"Picks","showInHome":true},
                        {"id":"tmdb.year","type":"series","enabled":false}]}"#,
    )
    .unwrap();
    let manifest = h.addon.manifest(&config).await;

    assert_eq!(manifest.catalogs.len(), 1);
    assert_eq!(manifest.id_prefixes, vec!["tmdb:", "tt"]);
    let picks = &manifest.catalogs[0];
    assert_eq!(picks.name, "Picks");
    assert_eq!(
        picks.extra[0].options.as_deref(),
        Some(&["Drama".to_string(), "Science Fiction".to_string()][..])
    );
    assert_eq!(picks.show_in_home, Some(true));
}
