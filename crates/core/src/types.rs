use serde::{Deserialize, Serialize};

/// Media kind as the addon protocol names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Path segment TMDB uses for this kind (`movie` / `tv`).
    pub fn tmdb_segment(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    /// Value of the `mediatype` tag on MDBList items.
    pub fn mdblist_tag(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "show",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum content rating a user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRating {
    #[serde(rename = "G")]
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG-13")]
    Pg13,
    #[serde(rename = "R")]
    R,
    #[serde(rename = "NC-17")]
    Nc17,
}

impl AgeRating {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Nc17 => "NC-17",
        }
    }

    /// US certifications allowed at this rating, most permissive last.
    ///
    /// `NC-17` returns an empty set: TMDB has no certification that
    /// means "everything", so no filter is applied.
    pub fn allowed_certifications(self, media: MediaType) -> &'static [&'static str] {
        static MOVIE: [&str; 4] = ["G", "PG", "PG-13", "R"];
        static TV: [&str; 4] = ["TV-G", "TV-PG", "TV-14", "TV-MA"];
        let ladder: &'static [&'static str; 4] = match media {
            MediaType::Movie => &MOVIE,
            MediaType::Series => &TV,
        };
        match self {
            Self::G => &ladder[..1],
            Self::Pg => &ladder[..2],
            Self::Pg13 => &ladder[..3],
            Self::R => &ladder[..4],
            Self::Nc17 => &[],
        }
    }
}

impl std::fmt::Display for AgeRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
