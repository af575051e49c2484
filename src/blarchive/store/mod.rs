//! # Storage Layer
//!
//! Two in-memory collections, each synchronized to a [`PersistenceAdapter`]
//! after every mutation and bootstrapped from it on startup:
//!
//! - [`photocards::PhotocardStore`]: newest-first cards, addressed by id
//! - [`playlists::PlaylistStore`]: user-ordered playlist links
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: production storage, one JSON file per key
//! - [`mem_backend::MemBackend`]: in-memory storage for testing
//!
//! Both stores share one backend through an `Rc`, so the CLI builds a single
//! backend at startup and hands it to both.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── blarchive_photocards.json   # JSON array of photocards
//! ├── blarchive_playlists.json    # JSON array of playlist links
//! └── config.json
//! ```
//!
//! The two collections live under separate keys and are written separately.
//! A crash between the two writes can leave them out of step with each other.
//!
//! ## Failure policy
//!
//! In-memory state is the source of truth for the running process. A failed
//! write is logged and the mutation stands. A missing key seeds the built-in
//! defaults; so does a stored blob that cannot be parsed or fails validation,
//! in which case the discard is logged.

use crate::error::ArchiveError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod photocards;
pub mod playlists;

pub use backend::PersistenceAdapter;

pub const PHOTOCARDS_KEY: &str = "blarchive_photocards";
pub const PLAYLISTS_KEY: &str = "blarchive_playlists";

/// Read a collection from `backend`, falling back to `seed` when nothing
/// usable is stored under `key`.
pub(crate) fn bootstrap<T, B, S, V>(backend: &B, key: &str, seed: S, validate: V) -> Vec<T>
where
    T: DeserializeOwned,
    B: PersistenceAdapter + ?Sized,
    S: FnOnce() -> Vec<T>,
    V: FnOnce(&[T]) -> std::result::Result<(), String>,
{
    let blob = match backend.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!(key, "nothing stored yet, using built-in collection");
            return seed();
        }
        Err(e) => {
            warn!(key, error = %e, "could not read stored collection, using built-in collection");
            return seed();
        }
    };

    let items: Vec<T> = match serde_json::from_str(&blob) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable stored collection");
            return seed();
        }
    };

    if let Err(reason) = validate(&items) {
        warn!(key, %reason, "discarding invalid stored collection");
        return seed();
    }

    debug!(key, count = items.len(), "loaded stored collection");
    items
}

/// Write the whole collection under `key`. Failures are logged, not returned.
pub(crate) fn sync<T, B>(backend: &B, key: &str, items: &[T]) -> bool
where
    T: Serialize,
    B: PersistenceAdapter + ?Sized,
{
    let written = serde_json::to_string(items)
        .map_err(ArchiveError::from)
        .and_then(|blob| backend.save(key, &blob));

    match written {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to persist collection, keeping in-memory state");
            false
        }
    }
}

/// Returns the first value that appears twice in `values`.
pub(crate) fn first_duplicate<I, T>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + std::hash::Hash + Clone,
{
    let mut seen = std::collections::HashSet::new();
    values.into_iter().find(|v| !seen.insert(v.clone()))
}
