//! Maps upstream shapes onto the addon's catalog and meta schema.

use chrono::{NaiveDate, SecondsFormat};
use stremeta_core::MediaType;
use stremeta_core::stremio::{CastMember, Link, MetaPreview, POSTER_SHAPE_REGULAR, Video};
use stremeta_metadata::models::{
    Country, Credits, EpisodeDetails, Genre, ListedTitle, MdbListItem,
};
use stremeta_metadata::tmdb::IMAGE_BASE;

use crate::catalogs::mdblist_genre_label;

pub const UNKNOWN_GENRE: &str = "Unknown";
pub const NO_RATING: &str = "N/A";
const CAST_LIMIT: usize = 5;

const LOGO_BLACKLIST: &[&str] = &["https://assets.fanart.tv/fanart/tv/0/hdtvlogo/-60a02798b7eea.png"];

pub fn poster_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE}/w500{p}"))
}

pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE}/original{p}"))
}

fn profile_url(path: &str) -> String {
    format!("{IMAGE_BASE}/w276_and_h350_face{path}")
}

/// TMDB vote average with one decimal for catalog entries, `None` when
/// unrated.
pub fn vote_rating(vote: Option<f64>) -> Option<String> {
    vote.filter(|v| *v > 0.0).and_then(|v| detail_rating(Some(v)))
}

/// Detail records show any vote TMDB reports, zero included.
pub fn detail_rating(vote: Option<f64>) -> Option<String> {
    vote.map(|v| format!("{v:.1}"))
}

/// First four characters of an upstream date, or empty.
pub fn year_of(date: Option<&str>) -> String {
    date.and_then(|d| d.get(..4)).unwrap_or_default().to_string()
}

/// Discover or search result to catalog entry.
pub fn listed_title(item: &ListedTitle, media: MediaType, genres: &[Genre]) -> MetaPreview {
    let (name, date) = match media {
        MediaType::Movie => (item.title.as_deref(), item.release_date.as_deref()),
        MediaType::Series => (item.name.as_deref(), item.first_air_date.as_deref()),
    };

    MetaPreview {
        id: format!("tmdb:{}", item.id),
        media_type: media,
        name: name
            .or(item.title.as_deref())
            .or(item.name.as_deref())
            .unwrap_or_default()
            .to_string(),
        poster: poster_url(item.poster_path.as_deref()),
        poster_shape: POSTER_SHAPE_REGULAR.to_string(),
        background: backdrop_url(item.backdrop_path.as_deref()),
        genres: item
            .genre_ids
            .iter()
            .map(|id| {
                genres
                    .iter()
                    .find(|g| g.id == *id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
            })
            .collect(),
        year: year_of(date),
        imdb_rating: vote_rating(item.vote_average).unwrap_or_else(|| NO_RATING.to_string()),
        description: item.overview.clone().filter(|o| !o.is_empty()),
    }
}

/// Media kind from an MDBList item's `mediatype` tag.
pub fn mdblist_media(item: &MdbListItem) -> Option<MediaType> {
    match item.mediatype.as_deref()? {
        "movie" => Some(MediaType::Movie),
        "show" => Some(MediaType::Series),
        _ => None,
    }
}

/// Display labels of an item's genre tags, in list order.
pub fn mdblist_genres(item: &MdbListItem) -> Vec<String> {
    item.genre
        .iter()
        .flatten()
        .filter(|g| !g.trim().is_empty())
        .map(|g| mdblist_genre_label(g))
        .collect()
}

/// MDBList item to catalog entry.
///
/// With `wanted` set, only items whose tag matches are kept. Items without
/// an id, a title or a poster are dropped.
pub fn mdblist_preview(item: &MdbListItem, wanted: Option<MediaType>) -> Option<MetaPreview> {
    let media = mdblist_media(item)?;
    if wanted.is_some_and(|w| w != media) {
        return None;
    }

    let id = match (item.id, item.imdb_id.as_deref()) {
        (Some(tmdb_id), _) => format!("tmdb:{tmdb_id}"),
        (None, Some(imdb)) if imdb.starts_with("tt") => imdb.to_string(),
        _ => return None,
    };
    let name = item.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let poster = item.poster.as_deref().filter(|p| !p.is_empty())?;

    Some(MetaPreview {
        id,
        media_type: media,
        name: name.to_string(),
        poster: Some(poster.to_string()),
        poster_shape: POSTER_SHAPE_REGULAR.to_string(),
        background: None,
        genres: mdblist_genres(item),
        year: item.release_year.map(|y| y.to_string()).unwrap_or_default(),
        imdb_rating: NO_RATING.to_string(),
        description: None,
    })
}

/// `""`, `"45min"`, `"1h30min"`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        None | Some(0) => String::new(),
        Some(m) if m < 60 => format!("{m}min"),
        Some(m) => format!("{}h{}min", m / 60, m % 60),
    }
}

/// `"2008-2013"` for an ended series, otherwise the first air year.
pub fn series_year(status: Option<&str>, first_air: Option<&str>, last_air: Option<&str>) -> String {
    if status == Some("Ended") {
        if let (Some(first), Some(last)) = (first_air, last_air) {
            if let (Some(start), Some(end)) = (first.get(..5), last.get(..4)) {
                return format!("{start}{end}");
            }
        }
    }
    year_of(first_air)
}

/// Midnight UTC of an upstream `YYYY-MM-DD` date, as ISO-8601.
pub fn released_iso(date: Option<&str>) -> Option<String> {
    let date = NaiveDate::parse_from_str(date?, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn countries(countries: &[Country]) -> String {
    countries
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn cast(credits: &Credits) -> Vec<CastMember> {
    credits
        .cast
        .iter()
        .take(CAST_LIMIT)
        .map(|c| CastMember {
            name: c.name.clone(),
            character: c.character.clone(),
            photo: c.profile_path.as_deref().map(profile_url),
        })
        .collect()
}

/// Crew names holding `job` (`Director`, `Writer`).
pub fn crew_with_job(credits: &Credits, job: &str) -> Vec<String> {
    credits
        .crew
        .iter()
        .filter(|c| c.job.as_deref() == Some(job))
        .map(|c| c.name.clone())
        .collect()
}

/// `movie/the-dark-knight-0468569`.
pub fn slug(media: MediaType, title: &str, imdb_id: Option<&str>) -> String {
    let title: String = title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let digits = imdb_id.map(|id| id.replacen("tt", "", 1)).unwrap_or_default();
    format!("{}/{title}-{digits}", media.as_str())
}

/// Rating-poster URL for a TMDB title.
///
/// Free tiers (`t0`, `t1`) and English users get the default artwork;
/// everyone else asks for localized text.
pub fn rpdb_poster_url(key: &str, media: MediaType, tmdb_id: u64, language: &str) -> String {
    let tier = key.split('-').next().unwrap_or_default();
    let lang = stremeta_core::config::primary_subtag(language);
    let base = format!(
        "https://api.ratingposterdb.com/{key}/tmdb/poster-default/{}-{tmdb_id}.jpg?fallback=true",
        media.as_str()
    );
    if matches!(tier, "t0" | "t1") || lang == "en" {
        base
    } else {
        format!("{base}&lang={lang}")
    }
}

/// Drops known-broken logos and upgrades the scheme.
pub fn clean_logo(logo: Option<String>) -> Option<String> {
    let logo = logo.filter(|l| !l.is_empty())?;
    if LOGO_BLACKLIST.contains(&logo.as_str()) {
        return None;
    }
    Some(match logo.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => logo,
    })
}

/// Inputs for the cross-link list of a meta.
pub struct LinkSource<'a> {
    pub media: MediaType,
    pub title: &'a str,
    pub imdb_id: Option<&'a str>,
    pub rating: &'a str,
    pub genres: &'a [Genre],
    pub credits: &'a Credits,
    pub host_name: &'a str,
    pub language: &'a str,
}

pub fn links(src: &LinkSource<'_>) -> Vec<Link> {
    let mut links = Vec::new();

    if let Some(imdb) = src.imdb_id {
        links.push(Link {
            name: src.rating.to_string(),
            category: "imdb".into(),
            url: format!("https://imdb.com/title/{imdb}"),
        });
    }
    links.push(Link {
        name: src.title.to_string(),
        category: "share".into(),
        url: format!("https://www.strem.io/s/{}", slug(src.media, src.title, src.imdb_id)),
    });

    let manifest = urlencoding::encode(src.host_name);
    for genre in src.genres {
        links.push(Link {
            name: genre.name.clone(),
            category: "Genres".into(),
            url: format!(
                "stremio:///discover/{manifest}%2F{}%2Fmanifest.json/{}/tmdb.top?genre={}",
                src.language,
                src.media.as_str(),
                urlencoding::encode(&genre.name)
            ),
        });
    }

    let people = cast(src.credits)
        .into_iter()
        .map(|c| (c.name, "Cast"))
        .chain(crew_with_job(src.credits, "Director").into_iter().map(|n| (n, "Directors")))
        .chain(crew_with_job(src.credits, "Writer").into_iter().map(|n| (n, "Writers")));
    for (name, category) in people {
        links.push(Link {
            url: format!("stremio:///search?search={}", urlencoding::encode(&name)),
            name,
            category: category.into(),
        });
    }

    links
}

/// Episode entry. Ids use the IMDb id when known so stream addons can match.
pub fn episode_video(
    episode: &EpisodeDetails,
    tmdb_id: u64,
    imdb_id: Option<&str>,
    hide_thumbnails: bool,
) -> Video {
    let (season, number) = (episode.season_number, episode.episode_number);
    let id = match imdb_id {
        Some(imdb) => format!("{imdb}:{season}:{number}"),
        None => format!("tmdb:{tmdb_id}:{season}:{number}"),
    };
    Video {
        id,
        title: episode
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Episode {number}")),
        season,
        episode: number,
        released: released_iso(episode.air_date.as_deref()),
        overview: episode.overview.clone().filter(|o| !o.is_empty()),
        thumbnail: if hide_thumbnails {
            None
        } else {
            poster_url(episode.still_path.as_deref())
        },
    }
}
