//! Active window materialization.
//!
//! The window is the only place generated and overridden state meet. It is a
//! throwaway value: the engine rebuilds it wholesale on every move, so state
//! for cells that left the neighborhood never accumulates anywhere.

use std::collections::HashMap;

use crate::cell::CellId;
use crate::config::EngineConfig;
use crate::overrides::OverrideStore;
use crate::worldgen;

/// Snapshot of one cell as the presentation layer should render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellState {
    /// Token currently on the cell, if any.
    pub token: Option<u32>,
    /// Whether the cell is close enough to the player for pickup/craft.
    pub interactable: bool,
}

/// The materialized `(2R+1)²` neighborhood around the player.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowView {
    center: CellId,
    radius: u32,
    cells: HashMap<CellId, CellState>,
}

impl WindowView {
    pub fn center(&self) -> CellId {
        self.center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// `None` for cells outside the window; inside it every cell has a state,
    /// tokenless cells included.
    pub fn get(&self, cell: CellId) -> Option<CellState> {
        self.cells.get(&cell).copied()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, CellState)> + '_ {
        self.cells.iter().map(|(cell, state)| (*cell, *state))
    }
}

/// Resolve a single cell's current token: the override wins if one exists,
/// otherwise the generator decides. Never writes anything; generated state
/// stays ephemeral until the player actually interacts with the cell.
pub(crate) fn cell_token(cell: CellId, store: &OverrideStore, spawn_rate: f64) -> Option<u32> {
    match store.get(cell) {
        Some(value) => value.token(),
        None => worldgen::generate(cell, spawn_rate),
    }
}

/// Compute the live state of every cell within Chebyshev distance
/// `config.view_radius` of `player`. Returns exactly `(2R+1)²` entries.
pub fn materialize(player: CellId, store: &OverrideStore, config: &EngineConfig) -> WindowView {
    let radius = i64::from(config.view_radius);
    let side = 2 * config.view_radius as usize + 1;
    let mut cells = HashMap::with_capacity(side * side);

    for di in -radius..=radius {
        for dj in -radius..=radius {
            let cell = player.offset(di, dj);
            let state = CellState {
                token: cell_token(cell, store, config.spawn_rate),
                interactable: player.chebyshev(cell) <= u64::from(config.interact_radius),
            };
            cells.insert(cell, state);
        }
    }

    WindowView {
        center: player,
        radius: config.view_radius,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::CellValue;

    fn config(view_radius: u32) -> EngineConfig {
        EngineConfig {
            view_radius,
            interact_radius: view_radius.min(2),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn window_covers_exactly_the_chebyshev_ball() {
        let store = OverrideStore::new();
        let config = config(3);
        let player = CellId::new(10, -10);
        let view = materialize(player, &store, &config);

        assert_eq!(view.len(), 7 * 7);
        assert!(view.contains(CellId::new(13, -7)));
        assert!(view.contains(CellId::new(7, -13)));
        assert!(!view.contains(CellId::new(14, -10)));
    }

    #[test]
    fn override_beats_generator() {
        let mut store = OverrideStore::new();
        let config = EngineConfig {
            spawn_rate: 1.0, // every untouched cell would spawn
            ..config(2)
        };
        let player = CellId::new(0, 0);
        store.set(CellId::new(0, 1), CellValue::Empty);
        store.set(CellId::new(1, 0), CellValue::Token(16));

        let view = materialize(player, &store, &config);
        assert_eq!(view.get(CellId::new(0, 1)).unwrap().token, None);
        assert_eq!(view.get(CellId::new(1, 0)).unwrap().token, Some(16));
        // Untouched neighbor falls through to the generator.
        assert_eq!(view.get(CellId::new(0, 2)).unwrap().token, Some(1));
    }

    #[test]
    fn materializing_never_writes_overrides() {
        let store = OverrideStore::new();
        let config = EngineConfig {
            spawn_rate: 1.0,
            ..config(4)
        };
        for _ in 0..5 {
            materialize(CellId::new(0, 0), &store, &config);
        }
        assert!(store.is_empty(), "flyweight invariant broken");
    }

    #[test]
    fn interactable_marks_the_inner_radius_only() {
        let store = OverrideStore::new();
        let config = EngineConfig {
            view_radius: 5,
            interact_radius: 2,
            ..EngineConfig::default()
        };
        let player = CellId::new(0, 0);
        let view = materialize(player, &store, &config);

        assert!(view.get(CellId::new(2, 1)).unwrap().interactable);
        assert!(view.get(CellId::new(-2, -2)).unwrap().interactable);
        assert!(!view.get(CellId::new(3, 0)).unwrap().interactable);
        assert!(!view.get(CellId::new(5, 5)).unwrap().interactable);
    }

    #[test]
    fn repeated_materialization_is_stable() {
        let store = OverrideStore::new();
        let config = config(6);
        let player = CellId::new(-4, 9);
        let first = materialize(player, &store, &config);
        let second = materialize(player, &store, &config);
        assert_eq!(first, second);
    }
}
