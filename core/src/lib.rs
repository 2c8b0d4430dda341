pub mod aggregate;
pub mod cache;
pub mod clock;
pub mod error;
pub mod models;
pub mod paging;
pub mod pipeline_config;
pub mod resolver;
pub mod retry;
pub mod single_flight;
pub mod sources;
pub mod string_normalization;
pub mod token;

// Re-export commonly used items
pub use aggregate::{Aggregator, Sources};
pub use cache::CacheStore;
pub use cache::types::{CacheEntry, CacheKey, CacheNamespace};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CacheError, CredentialError, FetchError, LookupError, SourceError};
pub use models::{
    ArtistInfo, ArtistSongs, CombinedResult, LyricsText, SearchHit, SongItem, SongPage,
    SongRecord, TrackInfo,
};
pub use paging::{CollectedSongs, PagedCollector};
pub use pipeline_config::PipelineConfig;
pub use resolver::{MatchStrategy, ResolvedArtist, resolve_artist};
pub use retry::{RetryPolicy, RetryingFetcher, Transience, backoff_delay};
pub use single_flight::SingleFlight;
pub use sources::{CatalogSource, LyricsSource, LyricsTextSource, TokenSource};
pub use string_normalization::normalize_term;
pub use token::{CredentialTokenCache, Token, TokenGrant};
