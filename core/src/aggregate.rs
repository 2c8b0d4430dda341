use crate::cache::CacheStore;
use crate::cache::types::{CacheKey, CacheNamespace};
use crate::error::{LookupError, SourceError};
use crate::models::{ArtistInfo, ArtistSongs, CombinedResult, LyricsText, TrackInfo};
use crate::paging::{CollectedSongs, PagedCollector};
use crate::pipeline_config::PipelineConfig;
use crate::resolver::resolve_artist;
use crate::retry::RetryingFetcher;
use crate::single_flight::SingleFlight;
use crate::sources::{CatalogSource, LyricsSource, LyricsTextSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upstream collaborators the aggregator talks to.
#[derive(Clone)]
pub struct Sources {
    pub lyrics: Arc<dyn LyricsSource>,
    pub lyrics_text: Arc<dyn LyricsTextSource>,
    pub catalog: Arc<dyn CatalogSource>,
}

enum LyricsLookup {
    NotFound,
    Found {
        artist_id: u64,
        collected: CollectedSongs,
    },
}

struct CatalogSection {
    info: Option<ArtistInfo>,
    top_tracks: Vec<TrackInfo>,
    error: Option<SourceError>,
}

/// Entry point for the route layer: resolves names against both catalogs,
/// merges what they return and keeps the answers in the persistent cache.
/// Concurrent lookups of the same raw input share one upstream pipeline.
pub struct Aggregator {
    sources: Sources,
    store: Arc<CacheStore>,
    fetcher: RetryingFetcher,
    config: PipelineConfig,
    song_flights: SingleFlight<Result<ArtistSongs, LookupError>>,
    combined_flights: SingleFlight<Result<CombinedResult, LookupError>>,
    info_flights: SingleFlight<Result<ArtistInfo, LookupError>>,
    lyrics_flights: SingleFlight<Result<LyricsText, LookupError>>,
}

impl Aggregator {
    pub fn new(sources: Sources, store: Arc<CacheStore>, config: PipelineConfig) -> Self {
        Self {
            sources,
            store,
            fetcher: RetryingFetcher::new(config.retry),
            config,
            song_flights: SingleFlight::new(),
            combined_flights: SingleFlight::new(),
            info_flights: SingleFlight::new(),
            lyrics_flights: SingleFlight::new(),
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Songs by the artist `raw_name` resolves to on the lyrics catalog.
    /// `NotFound` when no artist matches; an artist with no songs is `Ok`
    /// with an empty list.
    pub async fn resolve_artist_songs(&self, raw_name: &str) -> Result<ArtistSongs, LookupError> {
        let key = CacheKey::from_raw(raw_name);

        if let Some(cached) = self.cached_songs(raw_name, &key).await {
            return cached;
        }

        self.song_flights
            .run(key.as_str(), || self.fetch_artist_songs(raw_name, &key))
            .await
    }

    /// Catalog info, top tracks and lyrics-catalog songs for `raw_name`.
    /// A failing source leaves its section empty; only an artist neither
    /// source knows fails the call.
    pub async fn resolve_combined(&self, raw_name: &str) -> Result<CombinedResult, LookupError> {
        let key = CacheKey::from_raw(raw_name);

        if let Some(cached) = self
            .store
            .get_as::<CombinedResult>(CacheNamespace::CombinedSearch, &key)
            .await
        {
            debug!(artist = raw_name, "Combined result served from cache");
            return Ok(cached);
        }

        self.combined_flights
            .run(key.as_str(), || self.fetch_combined(raw_name, &key))
            .await
    }

    pub async fn catalog_info(&self, raw_name: &str) -> Result<ArtistInfo, LookupError> {
        let key = CacheKey::from_raw(raw_name);

        if let Some(cached) = self.cached_info(&key).await {
            return Ok(cached);
        }

        self.info_flights
            .run(key.as_str(), || self.fetch_catalog_info(raw_name, &key))
            .await
    }

    /// Lyrics text of the song page at `url`, from cache when possible.
    pub async fn lyrics_for_url(&self, url: &str) -> Result<LyricsText, LookupError> {
        let key = CacheKey::from_raw(url);

        if let Some(cached) = self.cached_lyrics(&key).await {
            return Ok(cached);
        }

        self.lyrics_flights
            .run(key.as_str(), || self.fetch_lyrics(url, &key))
            .await
    }

    async fn cached_info(&self, key: &CacheKey) -> Option<ArtistInfo> {
        self.store
            .get_as::<ArtistInfo>(CacheNamespace::CatalogInfo, key)
            .await
    }

    async fn fetch_catalog_info(
        &self,
        raw_name: &str,
        key: &CacheKey,
    ) -> Result<ArtistInfo, LookupError> {
        if let Some(cached) = self.cached_info(key).await {
            return Ok(cached);
        }

        let info = self
            .fetcher
            .fetch("catalog artist search", || {
                self.sources.catalog.search_artist(raw_name)
            })
            .await?
            .ok_or_else(|| LookupError::not_found(raw_name))?;

        self.remember(CacheNamespace::CatalogInfo, key, &info).await;
        Ok(info)
    }

    async fn cached_lyrics(&self, key: &CacheKey) -> Option<LyricsText> {
        let lyrics = self
            .store
            .get_as::<String>(CacheNamespace::Lyrics, key)
            .await?;

        Some(LyricsText {
            lyrics,
            cached: true,
        })
    }

    async fn fetch_lyrics(&self, url: &str, key: &CacheKey) -> Result<LyricsText, LookupError> {
        if let Some(cached) = self.cached_lyrics(key).await {
            return Ok(cached);
        }

        let lyrics = self
            .fetcher
            .fetch("lyrics page", || self.sources.lyrics_text.fetch_text(url))
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LookupError::not_found(url))?;

        self.remember(CacheNamespace::Lyrics, key, &lyrics).await;
        Ok(LyricsText {
            lyrics,
            cached: false,
        })
    }

    async fn cached_songs(
        &self,
        raw_name: &str,
        key: &CacheKey,
    ) -> Option<Result<ArtistSongs, LookupError>> {
        let cached = self
            .store
            .get_as::<ArtistSongs>(CacheNamespace::ArtistSearch, key)
            .await?;

        debug!(artist = raw_name, "Artist songs served from cache");
        Some(match cached.lyrics_artist_id {
            Some(_) => Ok(cached),
            None => Err(LookupError::not_found(raw_name)),
        })
    }

    async fn fetch_artist_songs(
        &self,
        raw_name: &str,
        key: &CacheKey,
    ) -> Result<ArtistSongs, LookupError> {
        // A flight that finished just before this one started may have filled the cache
        if let Some(cached) = self.cached_songs(raw_name, key).await {
            return cached;
        }

        match self.lookup_lyrics_artist(raw_name).await? {
            LyricsLookup::NotFound => {
                let not_found = ArtistSongs {
                    artist: raw_name.to_string(),
                    lyrics_artist_id: None,
                    songs: Vec::new(),
                };
                self.remember(CacheNamespace::ArtistSearch, key, &not_found)
                    .await;
                Err(LookupError::not_found(raw_name))
            }
            LyricsLookup::Found {
                artist_id,
                collected,
            } => {
                let result = ArtistSongs {
                    artist: raw_name.to_string(),
                    lyrics_artist_id: Some(artist_id),
                    songs: collected.songs,
                };

                if collected.complete {
                    self.remember(CacheNamespace::ArtistSearch, key, &result)
                        .await;
                } else {
                    info!(artist = raw_name, "Not caching truncated song list");
                }

                Ok(result)
            }
        }
    }

    async fn fetch_combined(
        &self,
        raw_name: &str,
        key: &CacheKey,
    ) -> Result<CombinedResult, LookupError> {
        if let Some(cached) = self
            .store
            .get_as::<CombinedResult>(CacheNamespace::CombinedSearch, key)
            .await
        {
            return Ok(cached);
        }

        let (catalog, lyrics) = tokio::join!(
            self.catalog_section(raw_name),
            self.lookup_lyrics_artist(raw_name)
        );

        let (lyrics_songs, lyrics_found, lyrics_complete, lyrics_error) = match lyrics {
            Ok(LyricsLookup::Found { collected, .. }) => {
                (collected.songs, true, collected.complete, None)
            }
            Ok(LyricsLookup::NotFound) => (Vec::new(), false, true, None),
            Err(e) => {
                warn!(artist = raw_name, error = %e, "Lyrics catalog unavailable, leaving songs empty");
                (Vec::new(), false, false, Some(e))
            }
        };

        if catalog.info.is_none() && !lyrics_found {
            return Err(match catalog.error.or(lyrics_error) {
                Some(e) => LookupError::Source(e),
                None => LookupError::not_found(raw_name),
            });
        }

        let complete = catalog.error.is_none() && lyrics_complete;
        let result = CombinedResult {
            artist: raw_name.to_string(),
            catalog_info: catalog.info,
            catalog_top_tracks: catalog.top_tracks,
            lyrics_songs,
        };

        if complete {
            self.remember(CacheNamespace::CombinedSearch, key, &result)
                .await;
        } else {
            info!(artist = raw_name, "Not caching partial combined result");
        }

        Ok(result)
    }

    async fn catalog_section(&self, raw_name: &str) -> CatalogSection {
        let info = match self
            .fetcher
            .fetch("catalog artist search", || {
                self.sources.catalog.search_artist(raw_name)
            })
            .await
        {
            Ok(Some(info)) => info,
            Ok(None) => {
                info!(artist = raw_name, "Artist not in music catalog");
                return CatalogSection {
                    info: None,
                    top_tracks: Vec::new(),
                    error: None,
                };
            }
            Err(e) => {
                warn!(artist = raw_name, error = %e, "Music catalog unavailable, leaving info empty");
                return CatalogSection {
                    info: None,
                    top_tracks: Vec::new(),
                    error: Some(e),
                };
            }
        };

        let top_tracks = self
            .fetcher
            .fetch("catalog top tracks", || {
                self.sources.catalog.top_tracks(&info.id)
            })
            .await;

        match top_tracks {
            Ok(top_tracks) => CatalogSection {
                info: Some(info),
                top_tracks,
                error: None,
            },
            Err(e) => {
                warn!(artist = raw_name, error = %e, "Top tracks unavailable, leaving them empty");
                CatalogSection {
                    info: Some(info),
                    top_tracks: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }

    async fn lookup_lyrics_artist(&self, raw_name: &str) -> Result<LyricsLookup, SourceError> {
        let hits = self
            .fetcher
            .fetch("lyrics artist search", || self.sources.lyrics.search(raw_name))
            .await?;

        let Some(artist) = resolve_artist(raw_name, &hits) else {
            return Ok(LyricsLookup::NotFound);
        };

        let collected = PagedCollector::new(self.sources.lyrics.as_ref(), &self.fetcher)
            .collect(artist.id, self.config.per_page, self.config.max_songs)
            .await;

        Ok(LyricsLookup::Found {
            artist_id: artist.id,
            collected,
        })
    }

    async fn remember<T: Serialize>(&self, namespace: CacheNamespace, key: &CacheKey, payload: &T) {
        if let Err(e) = self.store.put(namespace, key, payload).await {
            warn!(%namespace, %key, error = %e, "Failed to persist cache entry");
        }
    }
}
