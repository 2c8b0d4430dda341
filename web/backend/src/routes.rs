use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/search_artist", get(handlers::search_artist))
        .route("/enhanced_search", get(handlers::enhanced_search))
        .route("/artist_info", get(handlers::artist_info))
        .route("/get_lyrics", get(handlers::get_lyrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
