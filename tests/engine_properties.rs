use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use toroidal_life::patterns;
use toroidal_life::{CellState, SimulationEngine, wrap_coordinate};

prop_compose! {
    fn arb_engine()(
        cols in 3usize..24,
        rows in 3usize..24,
        seed in any::<u64>()
    ) -> SimulationEngine {
        SimulationEngine::with_rng(cols, rows, ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_wrap_coordinate_in_range(value in -10_000i64..10_000, size in 1usize..500) {
        let wrapped = wrap_coordinate(value, size);
        prop_assert!(wrapped < size);
        prop_assert_eq!((value - wrapped as i64).rem_euclid(size as i64), 0);
    }

    #[test]
    fn test_border_stays_dead(mut engine in arb_engine(), steps in 0usize..8) {
        for _ in 0..steps {
            engine.step();
        }
        let board = engine.board();
        for ((x, y), cell) in board.iter() {
            if board.is_border(x, y) {
                prop_assert_eq!(cell.state(), CellState::Dead);
                prop_assert_eq!(cell.history().len(), 1);
            }
        }
    }

    #[test]
    fn test_history_grows_one_per_step(mut engine in arb_engine(), steps in 0u64..8) {
        for _ in 0..steps {
            engine.step();
        }
        let board = engine.board();
        for (x, y) in board.interior() {
            let history = engine.cell_history(x, y).unwrap();
            prop_assert_eq!(history.len() as u64, steps + 1);
            // Newest first: generations steps-1, ..., 0, then the initial record at 0.
            for (i, entry) in history.iter().take(steps as usize).enumerate() {
                prop_assert_eq!(entry.generation, steps - 1 - i as u64);
            }
            prop_assert_eq!(history.back().unwrap().generation, 0);
        }
    }

    #[test]
    fn test_live_count_matches_scan(mut engine in arb_engine(), steps in 1usize..8) {
        for _ in 0..steps {
            engine.step();
            let scanned = engine.board().iter().filter(|(_, c)| c.state() == CellState::Alive).count();
            prop_assert_eq!(engine.live_count(), scanned);
        }
    }

    #[test]
    fn test_clear_is_idempotent(mut engine in arb_engine(), steps in 0usize..5, clears in 1usize..3) {
        for _ in 0..steps {
            engine.step();
        }
        for _ in 0..clears {
            engine.clear();
        }
        prop_assert_eq!(engine.generation_count(), 0);
        prop_assert_eq!(engine.live_count(), 0);
        for (_, cell) in engine.board().iter() {
            prop_assert_eq!(cell.state(), CellState::Dead);
            prop_assert_eq!(cell.history().len(), 1);
            prop_assert_eq!(cell.history()[0].state, CellState::Dead);
            prop_assert_eq!(cell.history()[0].generation, 0);
        }
    }

    #[test]
    fn test_border_edit_is_noop(mut engine in arb_engine(), along in 0usize..24) {
        let before = engine.state_hash();
        let (cols, rows) = (engine.cols(), engine.rows());
        prop_assert!(!engine.set_cell_alive(0, along % rows));
        prop_assert!(!engine.set_cell_alive(cols - 1, along % rows));
        prop_assert!(!engine.set_cell_alive(along % cols, 0));
        prop_assert!(!engine.set_cell_alive(along % cols, rows - 1));
        prop_assert_eq!(engine.state_hash(), before);
    }
}

#[test]
fn test_glider_translates_diagonally() {
    let mut engine = SimulationEngine::empty(20, 20).unwrap();
    let glider = patterns::find("Glider").unwrap();
    engine.apply_pattern(glider, (5, 5));

    let start: BTreeSet<_> = engine.board().live_cells().into_iter().collect();
    for _ in 0..4 {
        engine.step();
    }
    let end: BTreeSet<_> = engine.board().live_cells().into_iter().collect();

    let expected: BTreeSet<_> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(end, expected);
    assert_eq!(engine.generation_count(), 4);
    assert_eq!(engine.live_count(), 5);
}
