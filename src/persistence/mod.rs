//! High score storage
//!
//! The only state that outlives a process: one human-readable integer,
//! read whole and overwritten whole.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading or writing the stored score
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score {raw:?} is not a whole number")]
    Parse {
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Backing store for the best score
pub trait ScoreStore {
    /// Read the stored score. A store that has never been written returns `Ok(0)`.
    fn load(&self) -> Result<u64, PersistenceError>;
    /// Replace the stored score
    fn store(&mut self, score: u64) -> Result<(), PersistenceError>;
}

/// Plain-text file store (`highscore.dat` by default)
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        parse_score(&raw)
    }

    fn store(&mut self, score: u64) -> Result<(), PersistenceError> {
        std::fs::write(&self.path, score.to_string()).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub score: Option<u64>,
    /// Number of successful writes
    pub writes: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, PersistenceError> {
        Ok(self.score.unwrap_or(0))
    }

    fn store(&mut self, score: u64) -> Result<(), PersistenceError> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}

fn parse_score(raw: &str) -> Result<u64, PersistenceError> {
    let trimmed = raw.trim();
    trimmed.parse::<u64>().map_err(|source| PersistenceError::Parse {
        raw: trimmed.to_string(),
        source,
    })
}
