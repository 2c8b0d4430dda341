use serde::{Deserialize, Serialize};

/// Candidate artist from a lyrics-catalog search, in upstream ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub artist_id: u64,
    pub artist_name: Option<String>,
    pub full_title: Option<String>,
}

/// Raw song entry from one page of an artist's catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub song_art_image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub primary_artist_id: Option<u64>,
}

impl SongItem {
    /// `None` when the upstream left out the title or the URL.
    pub fn into_record(self) -> Option<SongRecord> {
        Some(SongRecord {
            title: self.title?,
            url: self.url?,
            image_url: self
                .song_art_image_url
                .filter(|url| !url.is_empty())
                .or(self.header_image_url.filter(|url| !url.is_empty())),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPage {
    pub items: Vec<SongItem>,
    pub next_page: Option<u32>,
}

impl SongPage {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    pub genres: Vec<String>,
    pub followers: Option<u64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    pub album_name: Option<String>,
    pub album_image: Option<String>,
    pub release_date: Option<String>,
    pub external_url: Option<String>,
}

/// Songs credited to the artist a name resolved to. `lyrics_artist_id` is
/// `None` for a cached "no such artist" answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSongs {
    pub artist: String,
    pub lyrics_artist_id: Option<u64>,
    pub songs: Vec<SongRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    pub artist: String,
    pub catalog_info: Option<ArtistInfo>,
    pub catalog_top_tracks: Vec<TrackInfo>,
    pub lyrics_songs: Vec<SongRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsText {
    pub lyrics: String,
    pub cached: bool,
}
