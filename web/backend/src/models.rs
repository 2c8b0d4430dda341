use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// `?artist=` on the artist routes. Optional so a missing value can be
/// answered with a JSON error instead of the extractor's plain-text one.
#[derive(Deserialize, Default)]
pub struct ArtistQuery {
    pub artist: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct LyricsQuery {
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
