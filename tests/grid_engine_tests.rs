//! Grid engine behaviour over whole games.
//!
//! These tests drive the engine the way a host does: clicks, clock advances
//! and `tick()` calls, with a seeded RNG so every board is reproducible.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memo_grid::core::{ManualClock, MemoError};
use memo_grid::grid::{
    CardFace, CellId, CellState, Dimensions, GridConfig, GridEngine, GridEvent, GridEventKind, GridView,
    SymbolRenderer,
};

fn engine(rows: usize, columns: usize, seed: u64) -> (GridEngine, Rc<ManualClock>) {
    let clock = ManualClock::shared();
    let grid = GridEngine::new(
        GridConfig::new().with_dimensions(rows, columns).with_seed(seed),
        Box::new(SymbolRenderer::numbers()),
        clock.clone(),
    )
    .unwrap();
    (grid, clock)
}

/// The two cells of every pair, ordered by value.
fn pairs(grid: &GridEngine) -> Vec<[CellId; 2]> {
    let mut by_value: FxHashMap<u16, Vec<CellId>> = FxHashMap::default();
    for (index, cell) in grid.cells().iter().enumerate() {
        by_value.entry(cell.value.0).or_default().push(CellId::new(index));
    }
    let mut rows: Vec<_> = by_value.into_iter().collect();
    rows.sort_by_key(|(value, _)| *value);
    rows.into_iter().map(|(_, ids)| [ids[0], ids[1]]).collect()
}

fn valid_dimensions() -> impl Strategy<Value = (usize, usize)> {
    (2usize..=8, 2usize..=8).prop_filter("even cell count", |(r, c)| (r * c) % 2 == 0)
}

proptest! {
    /// Every valid board deals each value exactly twice, all face down.
    #[test]
    fn test_every_valid_board_deals_pairs((rows, columns) in valid_dimensions(), seed in any::<u64>()) {
        let (grid, _) = engine(rows, columns, seed);
        let cells = rows * columns;

        prop_assert_eq!(grid.cell_count(), cells);
        prop_assert_eq!(grid.unmatched_pairs(), cells / 2);
        prop_assert!(grid.cells().iter().all(|c| c.state == CellState::Hidden));

        let mut counts = vec![0usize; cells / 2];
        for cell in grid.cells() {
            counts[cell.value.index()] += 1;
        }
        prop_assert!(counts.iter().all(|&n| n == 2));
    }

    /// Solving any board in any pair order ends the game exactly once.
    #[test]
    fn test_solve_ends_once((rows, columns) in valid_dimensions(), seed in any::<u64>()) {
        let (mut grid, _) = engine(rows, columns, seed);
        let mut ends = 0;
        let mut matches = 0;

        for [a, b] in pairs(&grid) {
            grid.on_card_interaction(a);
            for event in grid.on_card_interaction(b) {
                match event {
                    GridEvent::Try { is_match } => {
                        prop_assert!(is_match);
                        matches += 1;
                    }
                    GridEvent::End => ends += 1,
                    _ => {}
                }
            }
        }

        prop_assert_eq!(matches, rows * columns / 2);
        prop_assert_eq!(ends, 1);
        prop_assert!(grid.is_solved());
    }
}

/// Test that an odd board is refused and nothing changes.
#[test]
fn test_three_by_three_rejected() {
    let (mut grid, _) = engine(4, 4, 1);
    let before = grid.view();

    assert_eq!(
        grid.set_dimensions(3, 3, true),
        Err(MemoError::InvalidDimensions { rows: 3, columns: 3 })
    );
    assert_eq!(grid.view(), before);
}

/// Test that out-of-range sides are refused.
#[test]
fn test_out_of_range_sides_rejected() {
    let (mut grid, _) = engine(4, 4, 1);
    for (rows, columns) in [(1, 4), (4, 1), (9, 2), (2, 10)] {
        assert!(grid.set_dimensions(rows, columns, true).is_err());
    }
    assert_eq!(grid.dimensions(), Dimensions { rows: 4, columns: 4 });
}

/// Test that `start` fires once per reset cycle.
#[test]
fn test_start_once_per_reset_cycle() {
    let (mut grid, clock) = engine(2, 4, 3);
    let starts = Rc::new(RefCell::new(0));
    let sink = starts.clone();
    grid.on(GridEventKind::Start, move |_| *sink.borrow_mut() += 1);

    let board = pairs(&grid);
    grid.on_card_interaction(board[0][0]);
    grid.on_card_interaction(board[1][0]);
    clock.advance(1_000);
    grid.tick();
    grid.on_card_interaction(board[2][0]);
    assert_eq!(*starts.borrow(), 1);

    grid.reset().unwrap();
    grid.on_card_interaction(CellId::new(0));
    assert_eq!(*starts.borrow(), 2);
}

/// Test that a match takes one pair off the count and locks both cards.
#[test]
fn test_match_decrements_unmatched_pairs() {
    let (mut grid, _) = engine(4, 5, 11);
    let board = pairs(&grid);

    grid.on_card_interaction(board[3][0]);
    let events = grid.on_card_interaction(board[3][1]);

    assert_eq!(events.as_slice(), &[GridEvent::Try { is_match: true }]);
    assert_eq!(grid.unmatched_pairs(), 9);
    assert_eq!(grid.cell_state(board[3][0]), Some(CellState::Matched));

    // Matched cards ignore clicks.
    assert!(grid.on_card_interaction(board[3][0]).is_empty());
}

/// Test the flip-back delay and that reset cancels a pending flip-back.
#[test]
fn test_flip_back_and_cancel() {
    let (mut grid, clock) = engine(2, 2, 5);
    let board = pairs(&grid);

    grid.on_card_interaction(board[0][0]);
    let events = grid.on_card_interaction(board[1][0]);
    assert_eq!(events.as_slice(), &[GridEvent::Try { is_match: false }]);
    assert_eq!(grid.selected(), None);

    clock.advance(799);
    assert_eq!(grid.tick(), 0);
    assert_eq!(grid.cell_state(board[0][0]), Some(CellState::Open));

    clock.advance(1);
    assert_eq!(grid.tick(), 1);
    assert_eq!(grid.cell_state(board[0][0]), Some(CellState::Hidden));

    grid.on_card_interaction(board[0][0]);
    grid.on_card_interaction(board[1][0]);
    grid.reset().unwrap();
    assert_eq!(grid.pending_flip_backs(), 0);

    // A card opened on the new board must not be flipped by the old timer.
    grid.on_card_interaction(CellId::new(0));
    clock.advance(5_000);
    grid.tick();
    assert_eq!(grid.cell_state(CellId::new(0)), Some(CellState::Open));
}

/// Test that the same seed deals the same board.
#[test]
fn test_seeded_deal_is_reproducible() {
    let (a, _) = engine(6, 6, 42);
    let (b, _) = engine(6, 6, 42);
    let values = |g: &GridEngine| g.cells().iter().map(|c| c.value).collect::<Vec<_>>();

    assert_eq!(values(&a), values(&b));
}

/// Test that swapping the theme re-skins the board and keeps its progress.
#[test]
fn test_renderer_swap_keeps_progress() {
    let (mut grid, _) = engine(2, 2, 9);
    let board = pairs(&grid);
    grid.on_card_interaction(board[0][0]);
    grid.on_card_interaction(board[0][1]);

    grid.set_card_renderer(Box::new(SymbolRenderer::colors()));

    assert_eq!(grid.theme(), "colors");
    assert_eq!(grid.cell_state(board[0][0]), Some(CellState::Matched));
    assert!(matches!(grid.cell(board[0][0]).unwrap().front.face, CardFace::Color(_)));
    assert!(grid.cell(board[1][0]).unwrap().visible_face().is_back());
}

/// Test that the board snapshot serializes for a UI.
#[test]
fn test_view_serializes() {
    let (mut grid, _) = engine(2, 2, 4);
    grid.on_card_interaction(CellId::new(0));

    let json = serde_json::to_value(grid.view()).unwrap();
    assert_eq!(json["started"], true);
    assert_eq!(json["cells"].as_array().unwrap().len(), 4);

    let back: GridView = serde_json::from_value(json).unwrap();
    assert_eq!(back.unmatched_pairs, 2);
}
