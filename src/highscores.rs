//! High score persistence
//!
//! The session only signals `NewRecord`; whoever drives it loads the best
//! score at startup and writes it back through one of these stores.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and saves the single best score
pub trait HighScoreStore {
    /// Stored best score, 0 when nothing usable is stored
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SavedHighScore {
    pub best: u32,
}

/// Keeps the score in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "flappy_cat_highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No high score found, starting fresh");
                return 0;
            }
        };
        match serde_json::from_str::<SavedHighScore>(&json) {
            Ok(saved) => {
                log::info!("Loaded high score {}", saved.best);
                saved.best
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&SavedHighScore { best: score })?;
        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy_cat_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new(4);
        assert_eq!(store.load(), 4);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_file_save_and_load() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        store.save(42).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 42);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);
        let _ = std::fs::remove_file(path);
    }
}
