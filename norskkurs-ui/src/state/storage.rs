//! localStorage persistence

use norskkurs::favorites::{FavoriteSet, FavoriteStore, StoreError, FAVORITES_KEY};

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::Unavailable("localStorage".to_string()))
}

/// Read a plain string preference
pub fn read(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok().flatten()
}

/// Write a plain string preference; failures are ignored
pub fn write(key: &str, value: &str) {
    if let Ok(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

/// Favorite verbs as a JSON array under `norskkurs_verb_favs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl FavoriteStore for LocalStore {
    fn load(&self) -> FavoriteSet {
        read(FAVORITES_KEY)
            .map(|raw| FavoriteSet::from_json_lossy(&raw))
            .unwrap_or_default()
    }

    fn save(&self, favorites: &FavoriteSet) -> Result<(), StoreError> {
        local_storage()?
            .set_item(FAVORITES_KEY, &favorites.to_json()?)
            .map_err(|_| StoreError::Unavailable("localStorage quota".to_string()))
    }
}
