mod common;

use core_engine::{CellId, EngineMetrics};

#[test]
fn engine_boots_fresh() {
    let engine = common::fresh_engine(common::scenario_config());

    assert_eq!(engine.player().location, CellId::new(0, 0));
    assert_eq!(engine.inventory(), None);
    assert_eq!(*engine.metrics(), EngineMetrics::default());
    assert!(engine.overrides().is_empty());

    // Window covers exactly the (2R+1)² neighborhood around the start cell.
    let view = engine.window();
    assert_eq!(view.len(), 17 * 17);
    assert_eq!(view.center(), CellId::new(0, 0));
    assert!(view.get(CellId::new(8, 8)).is_some());
    assert!(view.get(CellId::new(9, 0)).is_none());
}

#[test]
fn a_short_session_runs_without_surprises() {
    let mut engine = common::fresh_engine(common::dense_config());

    engine.move_by(1, 0);
    engine.move_by(0, 1);
    let report = engine
        .activate(engine.player().location.offset(1, 1))
        .expect("dense world always has a token in reach");
    assert_eq!(report.inventory, Some(1));
    assert!(report.save_error.is_none());

    let metrics = engine.metrics();
    assert_eq!(metrics.moves, 2);
    assert_eq!(metrics.pickups, 1);
    assert_eq!(metrics.saves, 1);
}
