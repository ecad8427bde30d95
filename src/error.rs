//! Error types for the simulation core.
//!
//! Only screen-transition failures are meant to reach the player; everything
//! else is logged where it happens and the game keeps running.

use std::fmt;
use std::path::PathBuf;

use crate::screens::ScreenId;

#[derive(Debug)]
pub enum GameError {
    /// `switch_screen` was asked for a screen that was never registered.
    UnknownScreen { id: ScreenId },

    /// A configuration file could not be read or parsed.
    Config { path: PathBuf, message: String },

    /// The high-score store failed to load or save.
    Storage { key: String, message: String },

    /// Writing a frame to the terminal failed.
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownScreen { id } => {
                write!(f, "no screen registered for '{}'", id)
            }
            GameError::Config { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
            GameError::Storage { key, message } => {
                write!(f, "score store failure for '{}': {}", key, message)
            }
            GameError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Convenience alias used across the crate.
pub type GameResult<T> = Result<T, GameError>;
