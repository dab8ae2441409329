//! Best-score persistence.
//!
//! The score lives in a small JSON file of string keys to string values, so a
//! single named key holds the record as a stringified integer.

use bevy::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
            StoreError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IoError(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::JsonError(e)
    }
}

/// Where the best score is kept between runs.
pub trait ScoreStore: Send + Sync {
    /// The stored record, or 0 when there is none or it can't be read.
    fn load(&self) -> u32;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// File-backed store.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> u32 {
        self.read_entries()
            .ok()
            .and_then(|entries| entries.get(HIGH_SCORE_KEY)?.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        // Unrelated keys survive; a corrupt file is replaced.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(HIGH_SCORE_KEY.to_string(), score.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Store that forgets everything on exit.
#[derive(Default)]
pub struct MemoryScoreStore {
    score: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = score;
        Ok(())
    }
}

/// The store used by the running game.
#[derive(Resource)]
pub struct BestScoreStore(pub Box<dyn ScoreStore>);
