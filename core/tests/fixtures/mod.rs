#![allow(dead_code)]

use async_trait::async_trait;
use lyricbridge_core::{
    Aggregator, ArtistInfo, CacheStore, CatalogSource, FetchError, LyricsSource, LyricsTextSource,
    ManualClock, PipelineConfig, RetryPolicy, SearchHit, SongItem, SongPage, SourceError, Sources,
    TrackInfo,
};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const ANITTA_ID: u64 = 6546;
pub const GUEST_ID: u64 = 99;
pub const START: i64 = 1_700_000_000;

/// In-memory lyrics catalog with call counters.
#[derive(Default)]
pub struct FakeLyrics {
    pub hits: Vec<SearchHit>,
    pub pages: FxHashMap<u32, SongPage>,
    pub failing_pages: FxHashMap<u32, FetchError>,
    pub search_error: Option<FetchError>,
    pub search_delay: Duration,
    pub texts: FxHashMap<String, String>,
    pub text_delay: Duration,
    pub search_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub text_calls: AtomicUsize,
}

impl FakeLyrics {
    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn page_fetches(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn text_fetches(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LyricsSource for FakeLyrics {
    async fn search(&self, _term: &str) -> Result<Vec<SearchHit>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }

        match &self.search_error {
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
        self.page_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failing_pages.get(&page) {
            return Err(error.clone().into());
        }

        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl LyricsTextSource for FakeLyrics {
    async fn fetch_text(&self, url: &str) -> Result<Option<String>, SourceError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if !self.text_delay.is_zero() {
            tokio::time::sleep(self.text_delay).await;
        }
        Ok(self.texts.get(url).cloned())
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub artist: Option<ArtistInfo>,
    pub tracks: Vec<TrackInfo>,
    pub error: Option<FetchError>,
    pub search_delay: Duration,
    pub search_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_artist(name: &str) -> Self {
        Self {
            artist: Some(artist_info(name)),
            tracks: vec![track("Envolver"), track("Girl From Rio")],
            ..Default::default()
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn search_artist(&self, _name: &str) -> Result<Option<ArtistInfo>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }

        match &self.error {
            Some(error) => Err(error.clone().into()),
            None => Ok(self.artist.clone()),
        }
    }

    async fn top_tracks(&self, _artist_id: &str) -> Result<Vec<TrackInfo>, SourceError> {
        Ok(self.tracks.clone())
    }
}

pub fn hit(artist_id: u64, name: &str, full_title: &str) -> SearchHit {
    SearchHit {
        artist_id,
        artist_name: Some(name.to_string()),
        full_title: Some(full_title.to_string()),
    }
}

pub fn song(title: &str, primary_artist_id: u64) -> SongItem {
    SongItem {
        title: Some(title.to_string()),
        url: Some(format!("https://genius.com/{}-lyrics", title.replace(' ', "-"))),
        song_art_image_url: Some(format!("https://images.genius.com/{}.jpg", title.len())),
        header_image_url: None,
        primary_artist_id: Some(primary_artist_id),
    }
}

pub fn page(items: Vec<SongItem>, next_page: Option<u32>) -> SongPage {
    SongPage { items, next_page }
}

/// Consecutive pages of `per_page` primary songs each, the last one without a next page.
pub fn numbered_pages(artist_id: u64, page_count: u32, per_page: u32) -> FxHashMap<u32, SongPage> {
    (1..=page_count)
        .map(|number| {
            let items = (1..=per_page)
                .map(|index| song(&format!("Song {number}-{index}"), artist_id))
                .collect();
            let next = (number < page_count).then_some(number + 1);
            (number, page(items, next))
        })
        .collect()
}

pub fn artist_info(name: &str) -> ArtistInfo {
    ArtistInfo {
        id: "7FNnA9vBm6EKceENgCGRMb".to_string(),
        name: name.to_string(),
        popularity: Some(84),
        genres: vec!["funk carioca".to_string(), "pop".to_string()],
        followers: Some(17_000_000),
        image_url: None,
    }
}

pub fn track(name: &str) -> TrackInfo {
    TrackInfo {
        id: format!("track-{}", name.len()),
        name: name.to_string(),
        popularity: Some(70),
        preview_url: None,
        album_name: Some(name.to_string()),
        album_image: None,
        release_date: Some("2022-04-01".to_string()),
        external_url: None,
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1), Duration::from_secs(2))
}

pub fn anitta_lyrics() -> FakeLyrics {
    FakeLyrics {
        hits: vec![
            hit(ANITTA_ID, "Anitta", "Envolver by Anitta"),
            hit(GUEST_ID, "Anitta feat X", "Song by Anitta feat X"),
        ],
        pages: numbered_pages(ANITTA_ID, 2, 3),
        ..Default::default()
    }
}

pub async fn open_store(dir: &Path, clock: Arc<ManualClock>) -> Arc<CacheStore> {
    Arc::new(CacheStore::open(dir, clock).await.unwrap())
}

pub async fn build_aggregator(
    dir: &Path,
    lyrics: Arc<FakeLyrics>,
    catalog: Arc<FakeCatalog>,
) -> Aggregator {
    let clock = Arc::new(ManualClock::new(START));
    let store = open_store(dir, clock).await;
    let sources = Sources {
        lyrics: lyrics.clone(),
        lyrics_text: lyrics,
        catalog,
    };

    Aggregator::new(
        sources,
        store,
        PipelineConfig::new(50, 100, fast_retry()),
    )
}
