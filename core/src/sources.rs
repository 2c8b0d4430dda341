//! Narrow interfaces to the upstream services. The web crate implements
//! them over HTTP; tests implement them in memory.

use crate::error::{CredentialError, SourceError};
use crate::models::{ArtistInfo, SearchHit, SongPage, TrackInfo};
use async_trait::async_trait;

#[async_trait]
pub trait LyricsSource: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>, SourceError>;

    async fn fetch_page(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<SongPage, SourceError>;
}

#[async_trait]
pub trait LyricsTextSource: Send + Sync {
    /// Lyrics text of a song page, `None` when the page carries none.
    async fn fetch_text(&self, url: &str) -> Result<Option<String>, SourceError>;
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistInfo>, SourceError>;

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<TrackInfo>, SourceError>;
}

/// Bearer token for the catalog, refreshed through a `CredentialTokenCache`.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<String, CredentialError>;
}
