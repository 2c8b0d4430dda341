use crate::config::AppConfig;
use crate::genius::GeniusClient;
use crate::spotify::SpotifyClient;
use lyricbridge_core::{
    Aggregator, CacheError, CacheStore, Clock, CredentialError, Sources, SystemClock, TokenSource,
};
use std::sync::Arc;
use tracing::info;

pub struct AppState {
    pub aggregator: Aggregator,
    pub tokens: Arc<dyn TokenSource>,
}

impl AppState {
    /// Current catalog bearer token, refreshed when close to expiry.
    pub async fn token(&self) -> Result<String, CredentialError> {
        self.tokens.token().await
    }

    /// Opens the cache directory, drops expired entries and wires the
    /// upstream clients into the aggregator.
    pub async fn new(config: &AppConfig) -> Result<Self, CacheError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let mut store = CacheStore::open(config.cache_dir.clone(), Arc::clone(&clock)).await?;
        for (namespace, ttl) in &config.ttl_overrides {
            store = store.with_ttl(*namespace, *ttl);
        }

        let removed = store.sweep_all().await;
        info!(
            cache_dir = %config.cache_dir.display(),
            removed,
            "Cache ready"
        );

        let timeout = config.pipeline.retry.request_timeout;
        let genius = Arc::new(GeniusClient::new(config.genius_token.clone(), timeout));
        let spotify = Arc::new(SpotifyClient::new(
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
            config.spotify_market.clone(),
            timeout,
            clock,
            config.pipeline.token_safety_margin,
        ));

        let sources = Sources {
            lyrics: genius.clone(),
            lyrics_text: genius,
            catalog: spotify.clone(),
        };

        Ok(Self {
            aggregator: Aggregator::new(sources, Arc::new(store), config.pipeline.clone()),
            tokens: spotify,
        })
    }
}
