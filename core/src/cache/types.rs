use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const DAY_SECONDS: u64 = 24 * 60 * 60;

/// Storage address derived from the raw (un-normalized) input: lowercase hex MD5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_raw(raw: &str) -> Self {
        Self(format!("{:x}", md5::compute(raw.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Translation,
    Explanation,
    Lyrics,
    ArtistSearch,
    CatalogInfo,
    CombinedSearch,
}

impl CacheNamespace {
    pub const ALL: [CacheNamespace; 6] = [
        CacheNamespace::Translation,
        CacheNamespace::Explanation,
        CacheNamespace::Lyrics,
        CacheNamespace::ArtistSearch,
        CacheNamespace::CatalogInfo,
        CacheNamespace::CombinedSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CacheNamespace::Translation => "translation",
            CacheNamespace::Explanation => "explanation",
            CacheNamespace::Lyrics => "lyrics",
            CacheNamespace::ArtistSearch => "artist-search",
            CacheNamespace::CatalogInfo => "catalog-info",
            CacheNamespace::CombinedSearch => "combined-search",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            CacheNamespace::Translation => "translate_cache.json",
            CacheNamespace::Explanation => "explain_cache.json",
            CacheNamespace::Lyrics => "lyrics_cache.json",
            CacheNamespace::ArtistSearch => "artist_search_cache.json",
            CacheNamespace::CatalogInfo => "spotify_cache.json",
            CacheNamespace::CombinedSearch => "enhanced_search_cache.json",
        }
    }

    pub fn default_ttl(self) -> Duration {
        let days = match self {
            CacheNamespace::Translation | CacheNamespace::Explanation => 60,
            CacheNamespace::Lyrics => 30,
            CacheNamespace::ArtistSearch => 7,
            CacheNamespace::CatalogInfo | CacheNamespace::CombinedSearch => 3,
        };
        Duration::from_secs(days * DAY_SECONDS)
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: serde_json::Value,
    pub stored_at: i64,
}

impl CacheEntry {
    pub fn age(&self, now: i64) -> i64 {
        now - self.stored_at
    }

    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        self.age(now) <= ttl.as_secs() as i64
    }
}
