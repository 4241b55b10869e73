//! Browser Storage
//!
//! `localStorage` backend for the preference repository.

use board_core::error::{StoreError, StoreResult};
use board_core::repository::{KeyValueStore, PreferenceStore};

/// Preferences as the UI uses them.
pub type Preferences = PreferenceStore<BrowserStorage>;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage.remove_item(key).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}
