use crate::cache::types::CacheEntry;
use crate::error::CacheError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

pub type NamespaceEntries = FxHashMap<String, CacheEntry>;

/// Reads a namespace file. Missing or unreadable files yield an empty namespace.
pub async fn load_entries(path: &Path) -> NamespaceEntries {
    let file_contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No existing cache file, starting empty");
            return NamespaceEntries::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read cache file, starting empty");
            return NamespaceEntries::default();
        }
    };

    match serde_json::from_slice::<NamespaceEntries>(&file_contents) {
        Ok(entries) => {
            debug!(path = %path.display(), entries = entries.len(), "Loaded cache file");
            entries
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Corrupt cache file, starting empty");
            NamespaceEntries::default()
        }
    }
}

/// Rewrites the whole namespace file: temp file first, then atomic rename.
pub async fn write_entries(path: &Path, entries: &NamespaceEntries) -> Result<(), CacheError> {
    let ordered: BTreeMap<&String, &CacheEntry> = entries.iter().collect();
    let serialized = serde_json::to_vec_pretty(&ordered)?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, serialized).await?;
    tokio::fs::rename(&temp_path, path).await?;

    Ok(())
}
