//! Static catalog tables: built-in catalog kinds, streaming providers,
//! localized catalog names and MDBList genre labels.

use stremeta_core::config::DEFAULT_LANGUAGE;

/// How a built-in catalog is presented in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogDef {
    /// Translation key of the display name.
    pub name_key: &'static str,
    /// Fallback display name when no translation exists.
    pub display_name: &'static str,
    pub extra_supported: &'static [&'static str],
}

impl CatalogDef {
    pub fn supports(&self, extra: &str) -> bool {
        self.extra_supported.contains(&extra)
    }
}

const GENRE_AND_SKIP: &[&str] = &["genre", "skip"];

/// Catalogs every install gets when the user picked none (`tmdb.<key>`).
pub static DEFAULT_CATALOGS: &[(&str, CatalogDef)] = &[
    (
        "top",
        CatalogDef {
            name_key: "popular",
            display_name: "Popular",
            extra_supported: GENRE_AND_SKIP,
        },
    ),
    (
        "year",
        CatalogDef {
            name_key: "year",
            display_name: "Year",
            extra_supported: GENRE_AND_SKIP,
        },
    ),
    (
        "language",
        CatalogDef {
            name_key: "language",
            display_name: "Language",
            extra_supported: GENRE_AND_SKIP,
        },
    ),
];

/// A streaming service TMDB can filter discover results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingProvider {
    pub key: &'static str,
    pub name: &'static str,
    pub watch_provider_id: u32,
    /// Watch region the provider id is valid in.
    pub country: &'static str,
}

pub static STREAMING_PROVIDERS: &[StreamingProvider] = &[
    StreamingProvider { key: "nfx", name: "Netflix", watch_provider_id: 8, country: "GB" },
    StreamingProvider { key: "nfk", name: "Netflix Kids", watch_provider_id: 175, country: "GB" },
    StreamingProvider { key: "hbm", name: "HBO Max", watch_provider_id: 1899, country: "US" },
    StreamingProvider { key: "dnp", name: "Disney+", watch_provider_id: 337, country: "GB" },
    StreamingProvider { key: "amp", name: "Prime Video", watch_provider_id: 119, country: "GB" },
    StreamingProvider { key: "atp", name: "Apple TV+", watch_provider_id: 350, country: "GB" },
    StreamingProvider { key: "pmp", name: "Paramount+", watch_provider_id: 531, country: "GB" },
    StreamingProvider { key: "pcp", name: "Peacock Premium", watch_provider_id: 386, country: "US" },
    StreamingProvider { key: "hlu", name: "Hulu", watch_provider_id: 15, country: "US" },
    StreamingProvider { key: "cts", name: "Curiosity Stream", watch_provider_id: 190, country: "US" },
    StreamingProvider { key: "mgl", name: "MagellanTV", watch_provider_id: 551, country: "US" },
    StreamingProvider { key: "cru", name: "Crunchyroll", watch_provider_id: 283, country: "US" },
    StreamingProvider { key: "hay", name: "hayu", watch_provider_id: 223, country: "GB" },
    StreamingProvider { key: "clv", name: "Claro video", watch_provider_id: 167, country: "BR" },
    StreamingProvider { key: "gop", name: "Globoplay", watch_provider_id: 307, country: "BR" },
    StreamingProvider { key: "hst", name: "Hotstar", watch_provider_id: 122, country: "IN" },
    StreamingProvider { key: "zee", name: "Zee5", watch_provider_id: 232, country: "IN" },
    StreamingProvider { key: "nlz", name: "NLZIET", watch_provider_id: 472, country: "NL" },
    StreamingProvider { key: "vil", name: "Videoland", watch_provider_id: 72, country: "NL" },
    StreamingProvider { key: "sst", name: "SkyShowtime", watch_provider_id: 1773, country: "NL" },
    StreamingProvider { key: "blv", name: "BluTV", watch_provider_id: 341, country: "TR" },
    StreamingProvider { key: "cpd", name: "Canal+", watch_provider_id: 381, country: "FR" },
    StreamingProvider { key: "dpe", name: "Discovery+", watch_provider_id: 510, country: "GB" },
];

pub fn streaming_provider(key: &str) -> Option<&'static StreamingProvider> {
    STREAMING_PROVIDERS.iter().find(|p| p.key == key)
}

/// Definition for a built-in catalog id (`tmdb.top`, `streaming.nfx`, …).
pub fn catalog_definition(catalog_id: &str) -> Option<CatalogDef> {
    let kind = catalog_id.split('.').nth(1)?;

    if let Some((_, def)) = DEFAULT_CATALOGS.iter().find(|(key, _)| *key == kind) {
        return Some(*def);
    }

    streaming_provider(kind).map(|p| CatalogDef {
        name_key: p.key,
        display_name: p.name,
        extra_supported: GENRE_AND_SKIP,
    })
}

static TRANSLATIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "en-US",
        &[
            ("popular", "Popular"),
            ("year", "Year"),
            ("language", "Language"),
            ("search", "Search"),
        ],
    ),
    (
        "pt-BR",
        &[
            ("popular", "Populares"),
            ("year", "Ano"),
            ("language", "Idioma"),
            ("search", "Pesquisar"),
        ],
    ),
    (
        "pt-PT",
        &[
            ("popular", "Populares"),
            ("year", "Ano"),
            ("language", "Idioma"),
            ("search", "Pesquisar"),
        ],
    ),
    (
        "es-ES",
        &[
            ("popular", "Populares"),
            ("year", "Año"),
            ("language", "Idioma"),
            ("search", "Buscar"),
        ],
    ),
    (
        "fr-FR",
        &[
            ("popular", "Populaires"),
            ("year", "Année"),
            ("language", "Langue"),
            ("search", "Rechercher"),
        ],
    ),
    (
        "de-DE",
        &[
            ("popular", "Beliebt"),
            ("year", "Jahr"),
            ("language", "Sprache"),
            ("search", "Suche"),
        ],
    ),
    (
        "it-IT",
        &[
            ("popular", "Popolari"),
            ("year", "Anno"),
            ("language", "Lingua"),
            ("search", "Cerca"),
        ],
    ),
    (
        "nl-NL",
        &[
            ("popular", "Populair"),
            ("year", "Jaar"),
            ("language", "Taal"),
            ("search", "Zoeken"),
        ],
    ),
];

fn lookup(language: &str, key: &str) -> Option<&'static str> {
    TRANSLATIONS
        .iter()
        .find(|(lang, _)| *lang == language)
        .and_then(|(_, entries)| entries.iter().find(|(k, _)| *k == key))
        .map(|(_, text)| *text)
}

/// Localized text for `key`, falling back to English.
pub fn translate(language: &str, key: &str) -> Option<&'static str> {
    lookup(language, key).or_else(|| lookup(DEFAULT_LANGUAGE, key))
}

static MDBLIST_GENRE_LABELS: &[(&str, &str)] = &[
    ("science-fiction", "Science Fiction"),
    ("sci-fi", "Science Fiction"),
    ("tv-movie", "TV Movie"),
    ("talk-show", "Talk Show"),
    ("film-noir", "Film Noir"),
    ("sport", "Sports"),
    ("game-show", "Game Show"),
    ("martial-arts", "Martial Arts"),
    ("superhero", "Superhero"),
    ("suspense", "Thriller"),
];

/// Display label for a raw MDBList genre tag.
pub fn mdblist_genre_label(raw: &str) -> String {
    let raw = raw.trim();
    if let Some((_, label)) = MDBLIST_GENRE_LABELS
        .iter()
        .find(|(tag, _)| tag.eq_ignore_ascii_case(raw))
    {
        return (*label).to_string();
    }

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
