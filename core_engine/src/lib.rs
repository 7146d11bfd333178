//! Cell-state engine for the Waylode grid collection game.
//!
//! Decides, for any addressable cell of an unbounded lattice overlaid on
//! geographic coordinates, what token (if any) it currently holds. Three
//! sources of truth are reconciled: a deterministic generator (pure in the
//! cell key), a sparse store of overrides for cells the player has changed,
//! and a durable save slot. Only the player's immediate neighborhood is ever
//! materialized, so memory stays bounded no matter how far the player roams.
//!
//! Presentation and positioning live outside this crate: they feed input into
//! a [`GameEngine`] and render the [`WindowView`] it hands back.

mod actions;
mod cell;
mod config;
mod engine;
pub mod metrics;
mod overrides;
mod save;
mod window;
pub mod worldgen;

pub use actions::{ActionError, PlayerState, TransitionKind};
pub use cell::CellId;
pub use config::{ConfigError, EngineConfig};
pub use engine::{ActionReport, GameEngine};
pub use metrics::EngineMetrics;
pub use overrides::{CellValue, OverrideStore};
pub use save::{FileSlot, MemorySlot, SaveError, SaveSlot};
pub use window::{materialize, CellState, WindowView};
