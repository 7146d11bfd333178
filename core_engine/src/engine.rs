//! The engine façade: one owned struct per session, no globals.
//!
//! All input (presentation-layer moves and activations, positioning-layer
//! absolute updates) funnels through `&mut self` entry points, so operations
//! are strictly serialized and each runs to completion before the next.

use tracing::{debug, info, warn};

use crate::actions::{self, ActionError, PlayerState, Transition, TransitionKind};
use crate::cell::CellId;
use crate::config::{ConfigError, EngineConfig};
use crate::metrics::EngineMetrics;
use crate::overrides::OverrideStore;
use crate::save::{self, SaveError, SaveSlot};
use crate::window::{self, WindowView};

/// Outcome of a successful pickup or craft.
///
/// `save_error` is `Some` when the write-through to durable storage failed;
/// the in-memory transition is committed regardless, the session just is not
/// guaranteed durable until the next successful save.
#[derive(Debug)]
pub struct ActionReport {
    pub kind: TransitionKind,
    pub cell: CellId,
    /// Token left on the cell after the transition.
    pub cell_token: Option<u32>,
    /// Inventory after the transition.
    pub inventory: Option<u32>,
    /// Whether this transition crossed the win threshold. Fires at most once
    /// per session; play continues afterwards.
    pub win: bool,
    pub save_error: Option<SaveError>,
}

/// A single game session: config, player, override store, the durable slot,
/// and the currently materialized window.
pub struct GameEngine<S: SaveSlot> {
    config: EngineConfig,
    slot: S,
    player: PlayerState,
    store: OverrideStore,
    window: WindowView,
    win_announced: bool,
    metrics: EngineMetrics,
}

impl<S: SaveSlot> GameEngine<S> {
    /// Build a session over `slot`, reading it once: an existing save resumes,
    /// an empty slot starts fresh, and a corrupt or unreadable slot logs and
    /// starts fresh rather than failing.
    pub fn new(config: EngineConfig, slot: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let (player, store) = match save::load(&slot) {
            Ok(Some((player, store))) => {
                info!(
                    target: "waylode::engine",
                    location = %player.location,
                    overrides = store.len(),
                    "resumed saved session"
                );
                (player, store)
            }
            Ok(None) => {
                info!(target: "waylode::engine", "no save found, starting fresh");
                (PlayerState::at(config.start_cell), OverrideStore::new())
            }
            Err(err) => {
                warn!(target: "waylode::engine", %err, "save unreadable, starting fresh");
                (PlayerState::at(config.start_cell), OverrideStore::new())
            }
        };

        let window = window::materialize(player.location, &store, &config);
        // A restored inventory already at or past the threshold must not
        // re-fire the one-shot win on its next transition.
        let win_announced = player
            .inventory
            .is_some_and(|value| value >= config.win_threshold);

        Ok(Self {
            config,
            slot,
            player,
            store,
            window,
            win_announced,
            metrics: EngineMetrics::default(),
        })
    }

    /// Presentation-layer relative move. Rebuilds the window around the new
    /// location, dropping everything materialized for cells that left it.
    pub fn move_by(&mut self, di: i64, dj: i64) -> &WindowView {
        self.player.location = self.player.location.offset(di, dj);
        self.metrics.moves += 1;
        self.refresh_window();
        &self.window
    }

    /// Positioning-collaborator absolute update. Returns `None` without any
    /// write when the coordinate resolves to the cell the player is already
    /// in.
    pub fn update_position(&mut self, lat: f64, lng: f64) -> Option<&WindowView> {
        let cell = CellId::from_geo(lat, lng, self.config.tile_size_deg);
        if cell == self.player.location {
            self.metrics.position_updates_ignored += 1;
            return None;
        }
        debug!(target: "waylode::engine", %cell, "absolute position update");
        self.player.location = cell;
        self.metrics.position_updates += 1;
        self.refresh_window();
        Some(&self.window)
    }

    /// Presentation-layer activation of a cell: pickup when the inventory is
    /// empty, craft when it holds a matching token. Errors leave all state
    /// unchanged; success writes through to the store and persists before
    /// returning.
    pub fn activate(&mut self, cell: CellId) -> Result<ActionReport, ActionError> {
        let transition = match actions::resolve(&self.player, &self.store, &self.config, cell) {
            Ok(transition) => transition,
            Err(err) => {
                self.metrics.rejected_actions += 1;
                debug!(target: "waylode::engine", %cell, %err, "action rejected");
                return Err(err);
            }
        };

        self.apply(&transition);
        let win = self.observe_win();
        let save_error = self.persist();
        self.refresh_window();

        Ok(ActionReport {
            kind: transition.kind,
            cell,
            cell_token: transition.cell_value.token(),
            inventory: self.player.inventory,
            win,
            save_error,
        })
    }

    /// Clear the override store and the durable slot, and put the player back
    /// at the configured start cell with an empty inventory. The fresh state
    /// is written to the slot, so an immediate load observes the defaults.
    pub fn reset(&mut self) -> Result<&WindowView, SaveError> {
        self.store.clear();
        self.player = PlayerState::at(self.config.start_cell);
        self.win_announced = false;
        self.metrics.resets += 1;
        info!(target: "waylode::engine", "session reset");

        let result = save::save(&mut self.slot, &self.player, &self.store);
        match &result {
            Ok(()) => self.metrics.saves += 1,
            Err(err) => {
                self.metrics.save_failures += 1;
                warn!(target: "waylode::engine", %err, "reset not persisted");
            }
        }
        self.refresh_window();
        result.map(|()| &self.window)
    }

    pub fn window(&self) -> &WindowView {
        &self.window
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn inventory(&self) -> Option<u32> {
        self.player.inventory
    }

    pub fn overrides(&self) -> &OverrideStore {
        &self.store
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The durable slot backing this session.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn apply(&mut self, transition: &Transition) {
        self.store.set(transition.cell, transition.cell_value);
        self.player.inventory = transition.inventory;
        match transition.kind {
            TransitionKind::Pickup => self.metrics.pickups += 1,
            TransitionKind::Craft => self.metrics.crafts += 1,
        }
    }

    fn observe_win(&mut self) -> bool {
        if self.win_announced {
            return false;
        }
        let crossed = self
            .player
            .inventory
            .is_some_and(|value| value >= self.config.win_threshold);
        if crossed {
            self.win_announced = true;
            info!(
                target: "waylode::engine",
                value = self.player.inventory,
                threshold = self.config.win_threshold,
                "win threshold reached"
            );
        }
        crossed
    }

    fn persist(&mut self) -> Option<SaveError> {
        match save::save(&mut self.slot, &self.player, &self.store) {
            Ok(()) => {
                self.metrics.saves += 1;
                None
            }
            Err(err) => {
                self.metrics.save_failures += 1;
                warn!(target: "waylode::engine", %err, "write-through failed");
                Some(err)
            }
        }
    }

    fn refresh_window(&mut self) {
        // Wholesale replacement: cells that left the window are dropped here
        // and re-derived on demand if the player returns.
        self.window = window::materialize(self.player.location, &self.store, &self.config);
    }
}
