//! Favorite verbs
//!
//! Favorites are a plain list of verb ids persisted on the learner's side.
//! Storage is pluggable: memory for tests, a JSON file for the CLI and
//! `localStorage` in the browser (implemented in the UI package).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key the list is stored under (localStorage key, file stem)
pub const FAVORITES_KEY: &str = "norskkurs_verb_favs";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Ordered set of favorite verb ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<u64>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored ids, dropping duplicates
    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Returns false if already present
    pub fn insert(&mut self, id: u64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Returns false if not present
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Add or remove `id`; returns whether it is a favorite afterwards
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored JSON array; anything unreadable yields an empty set
    pub fn from_json_lossy(raw: &str) -> Self {
        match serde_json::from_str::<Vec<u64>>(raw) {
            Ok(ids) => Self::from_ids(ids),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable favorites");
                Self::new()
            }
        }
    }
}

/// Persistence for the favorite list
pub trait FavoriteStore {
    /// Load the stored list; missing or corrupt data yields an empty set
    fn load(&self) -> FavoriteSet;

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError>;

    /// Toggle one id and persist the result
    fn toggle(&self, id: u64) -> Result<bool, StoreError> {
        let mut favorites = self.load();
        let now_favorite = favorites.toggle(id);
        self.save(&favorites)?;
        Ok(now_favorite)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: std::sync::Mutex<FavoriteSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoriteStore for MemoryStore {
    fn load(&self) -> FavoriteSet {
        self.inner
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        *guard = favorites.clone();
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::JsonFileStore;

#[cfg(feature = "native")]
mod file {
    use std::path::{Path, PathBuf};

    use super::{FavoriteSet, FavoriteStore, StoreError, FAVORITES_KEY};

    /// JSON array in `<data_dir>/norskkurs_verb_favs.json`
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(data_dir: impl AsRef<Path>) -> Self {
            Self {
                path: data_dir.as_ref().join(format!("{}.json", FAVORITES_KEY)),
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl FavoriteStore for JsonFileStore {
        fn load(&self) -> FavoriteSet {
            match std::fs::read_to_string(&self.path) {
                Ok(raw) => FavoriteSet::from_json_lossy(&raw),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => FavoriteSet::new(),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to read favorites");
                    FavoriteSet::new()
                }
            }
        }

        fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, favorites.to_json()?)?;
            tracing::debug!(path = %self.path.display(), count = favorites.len(), "Saved favorites");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favs = FavoriteSet::new();
        assert!(favs.toggle(7));
        assert!(favs.toggle(3));
        assert_eq!(favs.ids(), &[7, 3]);

        assert!(!favs.toggle(7));
        assert_eq!(favs.ids(), &[3]);
    }

    #[test]
    fn test_insert_never_duplicates() {
        let mut favs = FavoriteSet::from_ids([1, 2, 1, 2, 3]);
        assert_eq!(favs.ids(), &[1, 2, 3]);
        assert!(!favs.insert(2));
        assert!(!favs.remove(9));
        assert_eq!(favs.len(), 3);
    }

    #[test]
    fn test_json_round_trip_and_corrupt_input() {
        let favs = FavoriteSet::from_ids([5, 8]);
        assert_eq!(favs.to_json().unwrap(), "[5,8]");
        assert_eq!(FavoriteSet::from_json_lossy("[5,8]"), favs);
        assert!(FavoriteSet::from_json_lossy("{not json").is_empty());
    }

    #[test]
    fn test_memory_store_toggle_persists() {
        let store = MemoryStore::new();
        assert!(store.toggle(4).unwrap());
        assert!(store.load().contains(4));
        assert!(!store.toggle(4).unwrap());
        assert!(store.load().is_empty());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        // Missing file loads as empty
        assert!(store.load().is_empty());

        store.save(&FavoriteSet::from_ids([12, 4])).unwrap();
        assert_eq!(store.load().ids(), &[12, 4]);

        std::fs::write(store.path(), "garbage").unwrap();
        assert!(store.load().is_empty());
    }
}
