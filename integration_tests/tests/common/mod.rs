#![allow(dead_code)] // each test binary uses the subset of helpers it needs

use std::io;
use std::path::PathBuf;

use core_engine::{CellId, EngineConfig, GameEngine, MemorySlot, SaveError, SaveSlot};

/// Config matching the reference scenario: spawn rate 0.1, window radius 8,
/// interaction radius 2, win at 64, player starting at the origin.
pub fn scenario_config() -> EngineConfig {
    EngineConfig {
        spawn_rate: 0.1,
        view_radius: 8,
        interact_radius: 2,
        win_threshold: 64,
        start_cell: CellId::new(0, 0),
        ..EngineConfig::default()
    }
}

/// Scenario config with every untouched cell spawning a token, so tests can
/// interact with any nearby cell without hunting for spawns.
pub fn dense_config() -> EngineConfig {
    EngineConfig {
        spawn_rate: 1.0,
        ..scenario_config()
    }
}

pub fn fresh_engine(config: EngineConfig) -> GameEngine<MemorySlot> {
    GameEngine::new(config, MemorySlot::new()).expect("valid test config")
}

/// Slot whose reads succeed (empty) but whose writes always fail, standing in
/// for storage that went away mid-session.
pub struct OfflineSlot;

impl SaveSlot for OfflineSlot {
    fn read(&self) -> Result<Option<String>, SaveError> {
        Ok(None)
    }

    fn write(&mut self, _payload: &str) -> Result<(), SaveError> {
        Err(SaveError::StorageUnavailable(io::Error::new(
            io::ErrorKind::Other,
            "slot offline",
        )))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Err(SaveError::StorageUnavailable(io::Error::new(
            io::ErrorKind::Other,
            "slot offline",
        )))
    }
}

/// Unique scratch path for file-slot tests; removed on drop.
pub struct TempSave {
    pub path: PathBuf,
}

impl TempSave {
    pub fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "waylode_it_{tag}_{}_{:?}.json",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }
}

impl Drop for TempSave {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
