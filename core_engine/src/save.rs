//! Persistence gateway.
//!
//! Serializes player state plus the full override store into a durable
//! key-value slot as JSON. The slot is a trait so sessions can run against a
//! file on disk or purely in memory; the engine writes through after every
//! successful interaction and reads the slot once at startup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::PlayerState;
use crate::cell::CellId;
use crate::overrides::{CellValue, OverrideStore};

/// Bump only with a migration path; an unknown version reads as corrupt and
/// falls back to a fresh world rather than misinterpreting the payload.
const SAVE_VERSION: u32 = 1;

/// Failures of the durable layer.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The slot held data that cannot be understood. Recoverable: discard and
    /// start fresh.
    #[error("saved data is corrupt: {0}")]
    CorruptSave(String),
    /// The slot cannot be read or written. The in-memory session continues
    /// but is not guaranteed durable.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] io::Error),
}

/// A durable key-value slot holding at most one serialized save.
pub trait SaveSlot {
    /// `Ok(None)` means no save exists yet (first run).
    fn read(&self) -> Result<Option<String>, SaveError>;
    fn write(&mut self, payload: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

impl<S: SaveSlot + ?Sized> SaveSlot for Box<S> {
    fn read(&self) -> Result<Option<String>, SaveError> {
        (**self).read()
    }

    fn write(&mut self, payload: &str) -> Result<(), SaveError> {
        (**self).write(payload)
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        (**self).clear()
    }
}

/// Slot backed by a single file on disk. Writes go through a sibling temp
/// file and a rename, so a crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SaveSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SaveError::StorageUnavailable(err)),
        }
    }

    fn write(&mut self, payload: &str) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(SaveError::StorageUnavailable)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, payload).map_err(SaveError::StorageUnavailable)?;
        fs::rename(&tmp, &self.path).map_err(SaveError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SaveError::StorageUnavailable(err)),
        }
    }
}

/// In-process slot for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with an existing payload, e.g. to simulate a restart.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SaveSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), SaveError> {
        self.payload = Some(payload.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.payload = None;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    player: PlayerRecord,
    overrides: Vec<OverrideRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlayerRecord {
    i: i64,
    j: i64,
    inventory: Option<u32>,
}

/// One divergent cell. `value: None` means "generated default suppressed, the
/// cell is empty"; `Some(v)` means the cell holds exactly `v`.
#[derive(Debug, Serialize, Deserialize)]
struct OverrideRecord {
    i: i64,
    j: i64,
    value: Option<u32>,
}

/// Serialize the full session state into the slot.
pub fn save(
    slot: &mut impl SaveSlot,
    player: &PlayerState,
    store: &OverrideStore,
) -> Result<(), SaveError> {
    let mut overrides: Vec<OverrideRecord> = store
        .iter()
        .map(|(cell, value)| OverrideRecord {
            i: cell.i,
            j: cell.j,
            value: value.token(),
        })
        .collect();
    // Store iteration order is unspecified; sort so saves are byte-stable.
    overrides.sort_unstable_by_key(|record| (record.i, record.j));

    let file = SaveFile {
        version: SAVE_VERSION,
        player: PlayerRecord {
            i: player.location.i,
            j: player.location.j,
            inventory: player.inventory,
        },
        overrides,
    };

    let payload = serde_json::to_string(&file)
        .map_err(|err| SaveError::CorruptSave(err.to_string()))?;
    slot.write(&payload)?;
    tracing::debug!(
        target: "waylode::save",
        overrides = store.len(),
        "state persisted"
    );
    Ok(())
}

/// Read the slot back. `Ok(None)` on first run; `CorruptSave` when the slot
/// holds data that cannot be understood, leaving the caller to fall back to
/// defaults.
pub fn load(slot: &impl SaveSlot) -> Result<Option<(PlayerState, OverrideStore)>, SaveError> {
    let Some(payload) = slot.read()? else {
        return Ok(None);
    };

    let file: SaveFile = serde_json::from_str(&payload)
        .map_err(|err| SaveError::CorruptSave(err.to_string()))?;
    if file.version != SAVE_VERSION {
        return Err(SaveError::CorruptSave(format!(
            "unsupported save version {}",
            file.version
        )));
    }

    let player = PlayerState {
        location: CellId::new(file.player.i, file.player.j),
        inventory: file.player.inventory,
    };
    let store = file
        .overrides
        .into_iter()
        .map(|record| (CellId::new(record.i, record.j), CellValue::from(record.value)))
        .collect();

    Ok(Some((player, store)))
}
