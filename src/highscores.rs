//! Best score tracking
//!
//! Loaded once at startup from a [`ScoreStore`]; raised in memory when a run
//! beats it. Writing back is the session's job.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a final score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Raise the record if `score` beats it. Returns true on a new record.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the record, treating unreadable or malformed data as zero
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self::new(best)
            }
            Err(e) => {
                log::warn!("High score unavailable ({}), starting fresh", e);
                Self::default()
            }
        }
    }

    /// Write the record to the store, logging failures
    pub fn save(&self, store: &mut impl ScoreStore) -> bool {
        match store.store(self.best) {
            Ok(()) => {
                log::info!("High score saved ({})", self.best);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score: {}", e);
                false
            }
        }
    }
}
