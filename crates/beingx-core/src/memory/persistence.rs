//! JSON documents backing the short- and long-term tiers.
//!
//! Each tier is stored as `{"version": 1, "entries": [...]}` and fully
//! rewritten on every mutation. Loading never fails: a missing file is an
//! empty tier, and an unreadable, malformed or unknown-version file is logged
//! and treated as empty. The bare-array layout written by earlier releases is
//! still accepted.

use crate::errors::AgentError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a, E: ?Sized> {
    version: u32,
    entries: &'a E,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument<T> {
    Versioned { version: u32, entries: Vec<T> },
    Legacy(Vec<T>),
}

pub async fn load_entries<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No memory file at {}, starting empty", path.display());
            return Vec::new();
        }
        Err(e) => {
            log::warn!(
                "Failed to read memory file {}: {}. Starting empty",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    match serde_json::from_slice::<StoredDocument<T>>(&data) {
        Ok(StoredDocument::Versioned { version, entries }) if version == SCHEMA_VERSION => entries,
        Ok(StoredDocument::Versioned { version, .. }) => {
            log::warn!(
                "Memory file {} has unsupported version {} (expected {}). Starting empty",
                path.display(),
                version,
                SCHEMA_VERSION
            );
            Vec::new()
        }
        Ok(StoredDocument::Legacy(entries)) => {
            log::info!(
                "Loaded unversioned memory file {}; it will be upgraded on next save",
                path.display()
            );
            entries
        }
        Err(e) => {
            log::warn!(
                "Malformed memory file {}: {}. Starting empty",
                path.display(),
                e
            );
            Vec::new()
        }
    }
}

pub async fn save_entries<E>(path: &Path, entries: &E) -> Result<(), AgentError>
where
    E: Serialize + ?Sized,
{
    let document = DocumentRef {
        version: SCHEMA_VERSION,
        entries,
    };

    let serialized = serde_json::to_vec_pretty(&document)
        .map_err(|e| AgentError::persistence(path, format!("serialization failed: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AgentError::persistence(path, e.to_string()))?;
    }

    tokio::fs::write(path, serialized)
        .await
        .map_err(|e| AgentError::persistence(path, e.to_string()))?;

    log::debug!("Saved memory file {}", path.display());
    Ok(())
}
