#![allow(dead_code)]

use async_trait::async_trait;
use lyricbridge_core::{
    Aggregator, ArtistInfo, CacheStore, CatalogSource, CredentialError, FetchError, LyricsSource,
    LyricsTextSource, ManualClock, PipelineConfig, RetryPolicy, SearchHit, SongItem, SongPage,
    SourceError, Sources, TokenSource, TrackInfo,
};
use lyricbridge_web::state::AppState;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const ANITTA_ID: u64 = 6546;
pub const ENVOLVER_URL: &str = "https://genius.com/Anitta-envolver-lyrics";

#[derive(Default)]
pub struct StubLyrics {
    pub hits: Vec<SearchHit>,
    pub pages: FxHashMap<u32, SongPage>,
    pub texts: FxHashMap<String, String>,
    pub error: Option<FetchError>,
}

#[async_trait]
impl LyricsSource for StubLyrics {
    async fn search(&self, _term: &str) -> Result<Vec<SearchHit>, SourceError> {
        match &self.error {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.hits.clone()),
        }
    }

    async fn fetch_page(
        &self,
        _artist_id: u64,
        page: u32,
        _per_page: u32,
    ) -> Result<SongPage, SourceError> {
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl LyricsTextSource for StubLyrics {
    async fn fetch_text(&self, url: &str) -> Result<Option<String>, SourceError> {
        Ok(self.texts.get(url).cloned())
    }
}

#[derive(Default)]
pub struct StubCatalog {
    pub artist: Option<ArtistInfo>,
    pub error: Option<FetchError>,
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn search_artist(&self, _name: &str) -> Result<Option<ArtistInfo>, SourceError> {
        match &self.error {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.artist.clone()),
        }
    }

    async fn top_tracks(&self, _artist_id: &str) -> Result<Vec<TrackInfo>, SourceError> {
        Ok(Vec::new())
    }
}

/// Token source that hands out a fixed token, or fails when empty.
pub struct StubTokens(pub &'static str);

#[async_trait]
impl TokenSource for StubTokens {
    async fn token(&self) -> Result<String, CredentialError> {
        if self.0.is_empty() {
            return Err(CredentialError::MissingToken);
        }
        Ok(self.0.to_string())
    }
}

pub fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

pub fn anitta_lyrics() -> StubLyrics {
    let items = ["Envolver", "Girl From Rio", "Show Das Poderosas"]
        .iter()
        .map(|title| SongItem {
            title: Some(title.to_string()),
            url: Some(format!("https://genius.com/Anitta-{}-lyrics", title.replace(' ', "-"))),
            song_art_image_url: None,
            header_image_url: Some("https://images.genius.com/header.jpg".to_string()),
            primary_artist_id: Some(ANITTA_ID),
        })
        .collect();

    let mut pages = FxHashMap::default();
    pages.insert(1, SongPage { items, next_page: None });

    let mut texts = FxHashMap::default();
    texts.insert(ENVOLVER_URL.to_string(), "Envolver, envolver".to_string());

    StubLyrics {
        hits: vec![SearchHit {
            artist_id: ANITTA_ID,
            artist_name: Some("Anitta".to_string()),
            full_title: Some("Envolver by Anitta".to_string()),
        }],
        pages,
        texts,
        error: None,
    }
}

pub fn anitta_catalog() -> StubCatalog {
    StubCatalog {
        artist: Some(ArtistInfo {
            id: "7FNnA9vBm6EKceENgCGRMb".to_string(),
            name: "Anitta".to_string(),
            popularity: Some(84),
            genres: vec!["funk carioca".to_string()],
            followers: Some(17_000_000),
            image_url: None,
        }),
        error: None,
    }
}

pub async fn test_state(dir: &Path, lyrics: StubLyrics, catalog: StubCatalog) -> Arc<AppState> {
    let clock = Arc::new(ManualClock::new(1_700_000_000));
    let store = CacheStore::open(dir, clock).await.unwrap();
    let lyrics = Arc::new(lyrics);
    let sources = Sources {
        lyrics: lyrics.clone(),
        lyrics_text: lyrics,
        catalog: Arc::new(catalog),
    };
    let retry = RetryPolicy::new(3, Duration::from_millis(1), Duration::from_secs(2));

    Arc::new(AppState {
        aggregator: Aggregator::new(
            sources,
            Arc::new(store),
            PipelineConfig::new(50, 100, retry),
        ),
        tokens: Arc::new(StubTokens("catalog-token")),
    })
}
