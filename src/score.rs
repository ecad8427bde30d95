//! Current and high score.
//!
//! The high score survives between sessions through a [`HighScoreStore`],
//! a tiny key-value interface. A broken store never stops the game: load
//! failures read as zero and save failures are logged.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{GameError, GameResult};

pub trait HighScoreStore {
    fn load(&self, key: &str) -> GameResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> GameResult<()>;
}

/// Persisted record.
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    score: u32,
}

// ── Stores ────────────────────────────────────────────────────────────────────

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$HOME`, or the working directory when it is unset.
    pub fn in_home() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(home)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json"))
    }
}

impl HighScoreStore for FileStore {
    fn load(&self, key: &str) -> GameResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GameError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> GameResult<()> {
        std::fs::write(self.path_for(key), value).map_err(|e| GameError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> GameResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> GameResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Score manager ─────────────────────────────────────────────────────────────

pub struct ScoreManager {
    current: u32,
    high: u32,
    /// The high score was beaten during the current run.
    beaten: bool,
    key: String,
    store: Box<dyn HighScoreStore>,
}

impl ScoreManager {
    pub fn new(store: Box<dyn HighScoreStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let high = load_high_score(store.as_ref(), &key);
        Self {
            current: 0,
            high,
            beaten: false,
            key,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.current
    }

    pub fn high_score(&self) -> u32 {
        self.high
    }

    /// Add points, persisting a new high score as soon as it is beaten.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.current = self.current.saturating_add(points);
        if self.current > self.high {
            self.high = self.current;
            self.beaten = true;
            self.save_high_score();
        }
        self.current
    }

    pub fn is_new_high_score(&self) -> bool {
        self.beaten
    }

    pub fn reset_score(&mut self) {
        self.current = 0;
        self.beaten = false;
    }

    fn save_high_score(&mut self) {
        let record = HighScoreRecord { score: self.high };
        let result = serde_json::to_string(&record)
            .map_err(|e| GameError::Storage {
                key: self.key.clone(),
                message: e.to_string(),
            })
            .and_then(|json| self.store.save(&self.key, &json));
        if let Err(e) = result {
            warn!("could not save high score: {e}");
        }
    }
}

fn load_high_score(store: &dyn HighScoreStore, key: &str) -> u32 {
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str::<HighScoreRecord>(&raw) {
            Ok(record) => {
                info!(score = record.score, "loaded high score");
                record.score
            }
            Err(e) => {
                warn!("ignoring unreadable high score record: {e}");
                0
            }
        },
        Ok(None) => 0,
        Err(e) => {
            warn!("could not load high score: {e}");
            0
        }
    }
}
