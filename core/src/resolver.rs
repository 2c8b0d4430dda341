use crate::models::SearchHit;
use crate::string_normalization::{normalize_term, terms_overlap};
use tracing::{debug, info, warn};

/// Which rung of the matching ladder picked the artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Normalized names are equal or one contains the other
    NameMatch,
    /// The first hit's full title contains the query
    TitleContains,
    /// Nothing matched; the first hit is taken as-is
    FirstHit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    pub id: u64,
    pub name: Option<String>,
    pub strategy: MatchStrategy,
}

/// Picks the artist `raw_name` most likely refers to among `hits`, which are
/// expected in upstream relevance order.
///
/// Substring matching can land on an unrelated artist whose name happens to
/// contain (or be contained in) the query. Positional fallback means any
/// non-empty hit list resolves to something.
pub fn resolve_artist(raw_name: &str, hits: &[SearchHit]) -> Option<ResolvedArtist> {
    let normalized_query = normalize_term(raw_name);

    for hit in hits {
        let Some(hit_name) = hit.artist_name.as_deref() else {
            continue;
        };

        if terms_overlap(&normalized_query, &normalize_term(hit_name)) {
            debug!(query = raw_name, artist = hit_name, id = hit.artist_id, "Artist name match");
            return Some(resolved(hit, MatchStrategy::NameMatch));
        }
    }

    let first_hit = match hits.first() {
        Some(hit) => hit,
        None => {
            info!(query = raw_name, "No artist candidates");
            return None;
        }
    };

    let lowercase_query = raw_name.to_lowercase();
    let title_matches = first_hit
        .full_title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(&lowercase_query));

    if title_matches {
        info!(query = raw_name, id = first_hit.artist_id, "Using first hit whose title mentions the query");
        return Some(resolved(first_hit, MatchStrategy::TitleContains));
    }

    warn!(query = raw_name, id = first_hit.artist_id, "Falling back to first hit");
    Some(resolved(first_hit, MatchStrategy::FirstHit))
}

fn resolved(hit: &SearchHit, strategy: MatchStrategy) -> ResolvedArtist {
    ResolvedArtist {
        id: hit.artist_id,
        name: hit.artist_name.clone(),
        strategy,
    }
}
