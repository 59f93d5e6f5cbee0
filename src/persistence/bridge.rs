use super::{BEST_SCORE_KEY, ScoreStore};

/// Fire-and-forget link between the game and a `ScoreStore`
///
/// Failed writes are logged and dropped. Nothing is retried until the next
/// new best comes along.
#[derive(Debug)]
pub struct BestScoreBridge<S: ScoreStore> {
    store: S,
    key: String,
    /// Writes that have failed since creation
    pub failed_writes: u32,
}

impl<S: ScoreStore> BestScoreBridge<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, BEST_SCORE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            failed_writes: 0,
        }
    }

    /// Best score recorded by earlier sessions, zero when there is none
    pub fn load_best(&self) -> u32 {
        match self.store.get(&self.key) {
            Some(best) => {
                let best = u32::try_from(best).unwrap_or(u32::MAX);
                log::info!("Loaded best score {}", best);
                best
            }
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    /// Record a new best. Never fails from the caller's point of view.
    pub fn persist(&mut self, score: u32) {
        match self.store.set(&self.key, u64::from(score)) {
            Ok(()) => log::info!("Best score {} saved", score),
            Err(err) => {
                self.failed_writes += 1;
                log::warn!("Could not save best score {}: {}", score, err);
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
