//! Ranks a title's video list into the trailers a client should offer.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use stremeta_core::stremio::Trailer;
use stremeta_metadata::models::VideoEntry;

static TRAILER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)trailer").unwrap());

const EXCLUDED_KEYWORDS: &[&str] = &[
    "review",
    "reaction",
    "analysis",
    "breakdown",
    "essay",
    "discussion",
    "shorts",
    "short",
    "scene",
    "clip",
    "fan",
    "spoiler",
    "interview",
    "featurette",
];

const DISCARD_AT_OR_BELOW: i32 = -100;

pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}

/// Score of one candidate, `None` when it is not a playable YouTube entry.
pub fn score(video: &VideoEntry) -> Option<i32> {
    if !video
        .site
        .as_deref()
        .is_some_and(|site| site.eq_ignore_ascii_case("youtube"))
    {
        return None;
    }
    video.key.as_deref().filter(|k| !k.is_empty())?;

    let name = video.name.as_deref().unwrap_or_default();
    let mut score = 0;
    if video.official == Some(true) {
        score += 100;
    }
    score += match video.kind.as_deref() {
        Some("Trailer") => 50,
        Some("Teaser") => 20,
        Some("Featurette") => 10,
        _ => 0,
    };
    if TRAILER_NAME_RE.is_match(name) {
        score += 10;
    }
    if let Some(size) = video.size {
        score += (size.min(2160) / 10) as i32;
    }
    if video.iso_639_1.as_deref() == Some("en") {
        score += 5;
    }
    if is_excluded(name) {
        score -= 200;
    }
    Some(score)
}

/// Reviews, reactions, clips and the like are never offered, whatever
/// else they score.
fn is_excluded(name: &str) -> bool {
    let lowered = name.to_lowercase();
    EXCLUDED_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Best-first trailers, one per video key.
pub fn select_trailers(videos: &[VideoEntry]) -> Vec<Trailer> {
    let mut best: HashMap<&str, (i32, usize)> = HashMap::new();
    for (index, video) in videos.iter().enumerate() {
        let Some(score) = score(video) else { continue };
        if score <= DISCARD_AT_OR_BELOW
            || is_excluded(video.name.as_deref().unwrap_or_default())
        {
            continue;
        }
        let Some(key) = video.key.as_deref() else { continue };
        best.entry(key)
            .and_modify(|slot| {
                if score > slot.0 {
                    *slot = (score, index);
                }
            })
            .or_insert((score, index));
    }

    let mut ranked: Vec<(i32, usize)> = best.into_values().collect();
    // Equal scores keep list order.
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .filter_map(|(_, index)| {
            let video = &videos[index];
            let key = video.key.as_deref()?;
            Some(Trailer {
                name: video
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Trailer".to_string()),
                external_url: youtube_url(key),
            })
        })
        .collect()
}
