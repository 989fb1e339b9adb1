//! Wire shapes of the upstream services, trimmed to the fields the addon
//! reads. TMDB sends `null` for many list fields, hence `nullable`.

use serde::{Deserialize, Deserializer};

fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// A page of discover or search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<ListedTitle>,
    #[serde(default)]
    pub total_pages: u32,
}

/// A title as it appears in discover/search results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListedTitle {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre_ids: Vec<u32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GenreEnvelope {
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageInfo {
    pub iso_639_1: String,
    pub english_name: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `/movie/{id}` or `/tv/{id}` with `videos,credits,external_ids` appended.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleDetails {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<Genre>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub last_air_date: Option<String>,
    pub status: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub episode_run_time: Vec<u32>,
    pub last_episode_to_air: Option<EpisodeRef>,
    pub next_episode_to_air: Option<EpisodeRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub production_countries: Vec<Country>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub created_by: Vec<NamedPerson>,
    #[serde(default, deserialize_with = "nullable")]
    pub seasons: Vec<SeasonSummary>,
    #[serde(default, deserialize_with = "nullable")]
    pub credits: Credits,
    #[serde(default, deserialize_with = "nullable")]
    pub videos: VideoList,
    #[serde(default, deserialize_with = "nullable")]
    pub external_ids: ExternalIds,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EpisodeRef {
    pub runtime: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedPerson {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "nullable")]
    pub cast: Vec<CastCredit>,
    #[serde(default, deserialize_with = "nullable")]
    pub crew: Vec<CrewCredit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastCredit {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrewCredit {
    pub name: String,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoList {
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<VideoEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoEntry {
    pub key: Option<String>,
    pub name: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub official: Option<bool>,
    pub size: Option<u32>,
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExternalIds {
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
}

/// `/tv/{id}/season/{n}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub episodes: Vec<EpisodeDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeDetails {
    pub episode_number: u32,
    pub season_number: u32,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FindResults {
    #[serde(default, deserialize_with = "nullable")]
    pub movie_results: Vec<FoundTitle>,
    #[serde(default, deserialize_with = "nullable")]
    pub tv_results: Vec<FoundTitle>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FoundTitle {
    pub id: u64,
}

/// MDBList `/lists/{id}/items`: movies and shows arrive in separate arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MdbListItems {
    #[serde(default, deserialize_with = "nullable")]
    pub movies: Vec<MdbListItem>,
    #[serde(default, deserialize_with = "nullable")]
    pub shows: Vec<MdbListItem>,
}

impl MdbListItems {
    /// Movies followed by shows, in list order.
    pub fn into_all(self) -> Vec<MdbListItem> {
        let mut all = self.movies;
        all.extend(self.shows);
        all
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MdbListItem {
    /// TMDB id.
    pub id: Option<u64>,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<u64>,
    pub title: Option<String>,
    /// `movie` or `show`.
    pub mediatype: Option<String>,
    pub release_year: Option<i32>,
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre: Vec<Option<String>>,
}
