use crate::models::SongRecord;
use crate::retry::RetryingFetcher;
use crate::sources::LyricsSource;
use tracing::{debug, info, warn};

/// Songs gathered for one artist. `complete` is false when a page fetch
/// failed for good and the list stops short of what the source holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedSongs {
    pub songs: Vec<SongRecord>,
    pub complete: bool,
}

/// Walks an artist's song pages, keeping only songs the artist is the
/// primary credit on.
pub struct PagedCollector<'a> {
    source: &'a dyn LyricsSource,
    fetcher: &'a RetryingFetcher,
}

impl<'a> PagedCollector<'a> {
    pub fn new(source: &'a dyn LyricsSource, fetcher: &'a RetryingFetcher) -> Self {
        Self { source, fetcher }
    }

    /// Songs in source order, at most `max_items` of them. A failed page ends
    /// collection with whatever was already gathered.
    pub async fn collect(&self, artist_id: u64, per_page: u32, max_items: usize) -> CollectedSongs {
        let mut songs = Vec::new();
        let mut page = 1;

        if max_items == 0 {
            return CollectedSongs {
                songs,
                complete: true,
            };
        }

        loop {
            debug!(artist_id, page, per_page, "Fetching song page");

            let song_page = match self
                .fetcher
                .fetch("song page", || self.source.fetch_page(artist_id, page, per_page))
                .await
            {
                Ok(song_page) => song_page,
                Err(e) => {
                    warn!(artist_id, page, collected = songs.len(), error = %e, "Song collection truncated");
                    return CollectedSongs {
                        songs,
                        complete: false,
                    };
                }
            };

            if song_page.items.is_empty() {
                break;
            }

            for item in song_page.items {
                if item.primary_artist_id != Some(artist_id) {
                    continue;
                }

                match item.into_record() {
                    Some(record) => songs.push(record),
                    None => {
                        debug!(artist_id, page, "Skipping song without title or url");
                        continue;
                    }
                }

                if songs.len() >= max_items {
                    info!(artist_id, collected = songs.len(), "Reached song limit");
                    return CollectedSongs {
                        songs,
                        complete: true,
                    };
                }
            }

            match song_page.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        info!(artist_id, collected = songs.len(), "Collected primary songs");
        CollectedSongs {
            songs,
            complete: true,
        }
    }
}
