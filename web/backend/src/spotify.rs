use crate::http::{decode, read_body, transport_error};
use async_trait::async_trait;
use lyricbridge_core::{
    ArtistInfo, CatalogSource, Clock, CredentialError, CredentialTokenCache, FetchError,
    SourceError, TokenGrant, TokenSource, TrackInfo,
};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyTokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifySearchResponse {
    pub artists: Option<SpotifyArtistPage>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyArtistPage {
    #[serde(default)]
    pub items: Vec<SpotifyArtist>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub followers: Option<SpotifyFollowers>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyFollowers {
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyTopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    pub album: Option<SpotifyAlbum>,
    pub external_urls: Option<SpotifyExternalUrls>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyAlbum {
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyExternalUrls {
    pub spotify: Option<String>,
}

impl From<SpotifyArtist> for ArtistInfo {
    fn from(artist: SpotifyArtist) -> Self {
        ArtistInfo {
            id: artist.id,
            name: artist.name,
            popularity: artist.popularity,
            genres: artist.genres,
            followers: artist.followers.and_then(|followers| followers.total),
            image_url: artist.images.into_iter().next().map(|image| image.url),
        }
    }
}

impl From<SpotifyTrack> for TrackInfo {
    fn from(track: SpotifyTrack) -> Self {
        let (album_name, album_image, release_date) = match track.album {
            Some(album) => (
                album.name,
                album.images.into_iter().next().map(|image| image.url),
                album.release_date,
            ),
            None => (None, None, None),
        };

        TrackInfo {
            id: track.id,
            name: track.name,
            popularity: track.popularity,
            preview_url: track.preview_url,
            album_name,
            album_image,
            release_date,
            external_url: track.external_urls.and_then(|urls| urls.spotify),
        }
    }
}

/// First artist of a raw `/search?type=artist` body, if any.
pub fn parse_artist_search(body: &str) -> Result<Option<ArtistInfo>, FetchError> {
    let response: SpotifySearchResponse = decode(body)?;

    Ok(response
        .artists
        .and_then(|page| page.items.into_iter().next())
        .map(ArtistInfo::from))
}

pub fn parse_top_tracks(body: &str) -> Result<Vec<TrackInfo>, FetchError> {
    let response: SpotifyTopTracksResponse = decode(body)?;
    Ok(response.tracks.into_iter().map(TrackInfo::from).collect())
}

pub fn parse_token(body: &str) -> Result<TokenGrant, FetchError> {
    let response: SpotifyTokenResponse = decode(body)?;

    Ok(TokenGrant {
        access_token: response.access_token.unwrap_or_default(),
        expires_in: response.expires_in.unwrap_or_default(),
    })
}

/// Spotify Web API client using the client-credentials flow. One bearer
/// token is shared by all requests and refreshed shortly before it expires.
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    market: String,
    timeout: Duration,
    tokens: CredentialTokenCache,
}

impl SpotifyClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        market: String,
        timeout: Duration,
        clock: Arc<dyn Clock>,
        token_safety_margin: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            client_id,
            client_secret,
            market,
            timeout,
            tokens: CredentialTokenCache::new(clock, token_safety_margin),
        }
    }

    async fn get_api(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        let token = self.token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        Ok(read_body(response, self.timeout).await?)
    }
}

#[async_trait]
impl TokenSource for SpotifyClient {
    async fn token(&self) -> Result<String, CredentialError> {
        self.tokens
            .get_token(|| async {
                let response = self
                    .client
                    .post(SPOTIFY_TOKEN_URL)
                    .basic_auth(&self.client_id, Some(&self.client_secret))
                    .form(&[("grant_type", "client_credentials")])
                    .timeout(self.timeout)
                    .send()
                    .await
                    .map_err(|e| CredentialError::Exchange(transport_error(e, self.timeout)))?;

                let body = read_body(response, self.timeout)
                    .await
                    .map_err(CredentialError::Exchange)?;
                parse_token(&body).map_err(CredentialError::Exchange)
            })
            .await
    }
}

#[async_trait]
impl CatalogSource for SpotifyClient {
    async fn search_artist(&self, name: &str) -> Result<Option<ArtistInfo>, SourceError> {
        let url = format!("{SPOTIFY_API_URL}/search");
        let body = self
            .get_api(&url, &[("q", name), ("type", "artist"), ("limit", "1")])
            .await?;

        Ok(parse_artist_search(&body)?)
    }

    async fn top_tracks(&self, artist_id: &str) -> Result<Vec<TrackInfo>, SourceError> {
        let url = format!(
            "{SPOTIFY_API_URL}/artists/{}/top-tracks",
            urlencoding::encode(artist_id)
        );
        let body = self
            .get_api(&url, &[("market", self.market.as_str())])
            .await?;

        Ok(parse_top_tracks(&body)?)
    }
}
