use crate::models::{ArtistQuery, ErrorResponse, HealthResponse, LyricsQuery};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lyricbridge_core::{ArtistInfo, ArtistSongs, CombinedResult, LookupError, LyricsText};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug)]
pub enum ApiError {
    MissingParameter(&'static str),
    Lookup(LookupError),
}

impl From<LookupError> for ApiError {
    fn from(error: LookupError) -> Self {
        ApiError::Lookup(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::Lookup(LookupError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Lookup(LookupError::Source(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingParameter(name) => format!("The '{name}' parameter is required."),
            ApiError::Lookup(error) => error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self.message(), "Upstream failure");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ApiError::MissingParameter(name))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Lyricbridge API is running".to_string(),
    })
}

pub async fn search_artist(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArtistQuery>,
) -> Result<Json<ArtistSongs>, ApiError> {
    let artist = required(params.artist, "artist")?;
    let songs = state.aggregator.resolve_artist_songs(&artist).await?;
    Ok(Json(songs))
}

pub async fn enhanced_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArtistQuery>,
) -> Result<Json<CombinedResult>, ApiError> {
    let artist = required(params.artist, "artist")?;
    let combined = state.aggregator.resolve_combined(&artist).await?;
    Ok(Json(combined))
}

pub async fn artist_info(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArtistQuery>,
) -> Result<Json<ArtistInfo>, ApiError> {
    let artist = required(params.artist, "artist")?;
    let info = state.aggregator.catalog_info(&artist).await?;
    Ok(Json(info))
}

pub async fn get_lyrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LyricsQuery>,
) -> Result<Json<LyricsText>, ApiError> {
    let url = required(params.url, "url")?;
    let lyrics = state.aggregator.lyrics_for_url(&url).await?;
    Ok(Json(lyrics))
}
