use crate::http::{BROWSER_USER_AGENT, decode, read_body, transport_error};
use crate::lyrics_page::extract_lyrics;
use async_trait::async_trait;
use lyricbridge_core::{
    FetchError, LyricsSource, LyricsTextSource, SearchHit, SongItem, SongPage, SourceError,
};
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GENIUS_BASE_URL: &str = "https://api.genius.com";

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusEnvelope<T> {
    pub response: T,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusSearchResponse {
    #[serde(default)]
    pub hits: Vec<GeniusHit>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusHit {
    pub result: Option<GeniusSong>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusSongsResponse {
    #[serde(default)]
    pub songs: Vec<GeniusSong>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusSong {
    pub title: Option<String>,
    pub full_title: Option<String>,
    pub url: Option<String>,
    pub song_art_image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub primary_artist: Option<GeniusArtist>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeniusArtist {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// Search hits from a raw `/search` body. Hits without a primary artist id
/// are dropped since nothing can be paged for them.
pub fn parse_search(body: &str) -> Result<Vec<SearchHit>, FetchError> {
    let envelope: GeniusEnvelope<GeniusSearchResponse> = decode(body)?;

    Ok(envelope
        .response
        .hits
        .into_iter()
        .filter_map(|hit| {
            let song = hit.result?;
            let artist = song.primary_artist?;
            Some(SearchHit {
                artist_id: artist.id?,
                artist_name: artist.name,
                full_title: song.full_title,
            })
        })
        .collect())
}

pub fn parse_song_page(body: &str) -> Result<SongPage, FetchError> {
    let envelope: GeniusEnvelope<GeniusSongsResponse> = decode(body)?;
    let response = envelope.response;

    Ok(SongPage {
        items: response
            .songs
            .into_iter()
            .map(|song| SongItem {
                title: song.title,
                url: song.url,
                song_art_image_url: song.song_art_image_url,
                header_image_url: song.header_image_url,
                primary_artist_id: song.primary_artist.and_then(|artist| artist.id),
            })
            .collect(),
        next_page: response.next_page,
    })
}

/// Genius API client. Raw search responses are memoized in memory for a
/// day, in front of the persistent cache.
pub struct GeniusClient {
    client: Client,
    token: String,
    timeout: Duration,
    search_memo: Cache<String, String>,
}

impl GeniusClient {
    pub fn new(token: String, timeout: Duration) -> Self {
        let search_memo = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(24 * 60 * 60))
            .build();

        Self {
            client: Client::new(),
            token,
            timeout,
            search_memo,
        }
    }

    async fn get_api(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        read_body(response, self.timeout).await
    }
}

#[async_trait]
impl LyricsSource for GeniusClient {
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>, SourceError> {
        let memo_key = format!("search:{term}");

        if let Some(body) = self.search_memo.get(&memo_key).await {
            debug!(term, "Genius search served from memo");
            return Ok(parse_search(&body)?);
        }

        let url = format!("{GENIUS_BASE_URL}/search");
        let body = self.get_api(&url, &[("q", term.to_string())]).await?;
        let hits = parse_search(&body)?;

        self.search_memo.insert(memo_key, body).await;
        Ok(hits)
    }

    async fn fetch_page(
        &self,
        artist_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<SongPage, SourceError> {
        let url = format!("{GENIUS_BASE_URL}/artists/{artist_id}/songs");
        let query = [
            ("sort", "popularity".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];

        let body = self.get_api(&url, &query).await?;
        Ok(parse_song_page(&body)?)
    }
}

#[async_trait]
impl LyricsTextSource for GeniusClient {
    async fn fetch_text(&self, url: &str) -> Result<Option<String>, SourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let html = read_body(response, self.timeout).await?;
        Ok(extract_lyrics(&html))
    }
}
