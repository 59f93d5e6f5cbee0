use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ScoreStore, StoreError};

/// Flat JSON object of `key -> value` on disk
///
/// Writes go to a sibling `.tmp` file that is then renamed over the real
/// one, so a crash mid-write never leaves a truncated store behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, u64>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u64> {
        match self.read_all() {
            Ok(values) => values.get(key).copied(),
            Err(err) => {
                log::warn!("Could not read {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut values = self.read_all().unwrap_or_else(|err| {
            log::warn!("Discarding unreadable {}: {}", self.path.display(), err);
            BTreeMap::new()
        });
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }
}
