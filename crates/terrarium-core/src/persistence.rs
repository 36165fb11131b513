//! Save/Load functionality for session progress
//!
//! Only the pet roster and the level reached survive between plays; a level
//! itself always starts fresh. Saves use bincode with a format version.
//! Harness configs are plain JSON.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::engine::TerrariumConfig;
use crate::session::{GameSession, PetRoster};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of session progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Seed the session was started with
    pub seed: u64,
    /// Level to resume at
    pub level: u32,
    /// Owned helper pets
    pub roster: PetRoster,
}

/// Save session progress to a writer
pub fn save_session<W: Write>(writer: W, session: &GameSession) -> Result<(), PersistError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        seed: session.seed(),
        level: session.level(),
        roster: session.roster().clone(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load session progress from a reader
pub fn load_session<R: Read>(reader: R) -> Result<GameSession, PersistError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(GameSession::resume(save_data.seed, save_data.level, save_data.roster))
}

/// Read a JSON [`TerrariumConfig`]. Missing fields take their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<TerrariumConfig, PersistError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Error type for save/load and config operations
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for PersistError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        PersistError::Bincode(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "IO error: {}", e),
            PersistError::Bincode(e) => write!(f, "Serialization error: {}", e),
            PersistError::Json(e) => write!(f, "Config error: {}", e),
            PersistError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for PersistError {}
