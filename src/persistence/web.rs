//! Browser LocalStorage store
//!
//! Values are stored as decimal strings so scores saved by earlier builds
//! of the page are still readable.

use super::{ScoreStore, StoreError};

#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<u64> {
        let raw = Self::storage()?.get_item(key).ok()??;
        raw.trim().parse().ok()
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|err| StoreError::Rejected(format!("{:?}", err)))
    }
}
