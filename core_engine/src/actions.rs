//! Pickup/craft interaction state machine.
//!
//! The machine has two states, carried by the player's single inventory slot:
//! `Empty` and `Holding(v)`. [`resolve`] validates an action completely before
//! anything mutates, so every error path leaves the engine untouched.

use thiserror::Error;

use crate::cell::CellId;
use crate::config::EngineConfig;
use crate::overrides::{CellValue, OverrideStore};
use crate::window::cell_token;

/// The player: where they stand and the at-most-one token they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub location: CellId,
    pub inventory: Option<u32>,
}

impl PlayerState {
    pub const fn at(location: CellId) -> Self {
        Self {
            location,
            inventory: None,
        }
    }
}

/// Rejection reasons for a pickup/craft attempt. All recoverable; none mutate
/// any state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("cell {0} is beyond interaction range")]
    OutOfRange(CellId),
    #[error("cell {0} holds no token")]
    EmptyCell(CellId),
    #[error("held token {held} does not match cell token {found}")]
    Mismatch { held: u32, found: u32 },
}

/// Which transition a resolved action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Pickup,
    Craft,
}

/// A fully validated transition, ready to apply atomically: one override
/// upsert plus one inventory assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub cell: CellId,
    pub cell_value: CellValue,
    pub inventory: Option<u32>,
    pub kind: TransitionKind,
}

/// Resolve an activation of `cell` against the current player and store.
///
/// From `Empty`, a cell holding `v` yields a pickup: inventory becomes
/// `Holding(v)`, the cell's override becomes `Empty`. From `Holding(v)`, a
/// cell holding exactly `v` yields a craft: inventory empties, the cell's
/// override becomes `Token(2v)`.
pub(crate) fn resolve(
    player: &PlayerState,
    store: &OverrideStore,
    config: &EngineConfig,
    cell: CellId,
) -> Result<Transition, ActionError> {
    if player.location.chebyshev(cell) > u64::from(config.interact_radius) {
        return Err(ActionError::OutOfRange(cell));
    }

    let found = cell_token(cell, store, config.spawn_rate).ok_or(ActionError::EmptyCell(cell))?;

    match player.inventory {
        None => Ok(Transition {
            cell,
            cell_value: CellValue::Empty,
            inventory: Some(found),
            kind: TransitionKind::Pickup,
        }),
        Some(held) if held == found => Ok(Transition {
            cell,
            cell_value: CellValue::Token(held.saturating_mul(2)),
            inventory: None,
            kind: TransitionKind::Craft,
        }),
        Some(held) => Err(ActionError::Mismatch { held, found }),
    }
}
