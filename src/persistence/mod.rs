//! Best-score persistence
//!
//! The simulation never talks to storage. The driver loads the stored best
//! when a session is created and forwards new bests through
//! `BestScoreBridge`, which logs and swallows write failures.
//!
//! Stores:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: JSON object on disk with tmp-then-rename writes
//! - `web::LocalStorageStore`: browser LocalStorage (wasm32 only)

mod bridge;
mod file;
mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::path::PathBuf;

use thiserror::Error;

pub use bridge::BestScoreBridge;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "flappyBirdHighScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed store contents")]
    Json(#[from] serde_json::Error),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// External key-value store holding numeric values
pub trait ScoreStore {
    /// Stored value, or `None` when missing or unreadable
    fn get(&self, key: &str) -> Option<u64>;

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}
