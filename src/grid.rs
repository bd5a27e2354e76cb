// grid.rs - Toroidal board, cells and per-cell history for Conway's Game of Life

use rand::Rng;
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Neighbor offsets, `{-1,0,1} x {-1,0,1}` without the cell itself.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn from_alive(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }

    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// Numeric form used by neighbor sums and history charts.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Classic B3/S23: birth on exactly 3, survival on 2 or 3.
    pub fn next(self, neighbors: u8) -> CellState {
        match (self, neighbors) {
            (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
            (CellState::Dead, 3)                          => CellState::Alive, // Birth
            (CellState::Alive, _)                         => CellState::Dead,  // Death
            (CellState::Dead, _)                          => CellState::Dead,
        }
    }
}

/// One history record: the state a cell held during `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: CellState,
    pub generation: u64,
}

/// A single grid position. Lives for the whole run of a board; only its state
/// and history change between generations.
#[derive(Debug, Clone)]
pub struct Cell {
    state: CellState,
    history: VecDeque<HistoryEntry>, // newest first
}

impl Cell {
    fn new(state: CellState, generation: u64) -> Self {
        let mut cell = Self {
            state,
            history: VecDeque::new(),
        };
        cell.record(generation);
        cell
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// History records, most recent first.
    pub fn history(&self) -> &VecDeque<HistoryEntry> {
        &self.history
    }

    /// Fraction of history records in which the cell was alive (0 for an empty history).
    pub fn live_fraction(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let alive = self.history.iter().filter(|h| h.state.is_alive()).count();
        alive as f64 / self.history.len() as f64
    }

    /// Prepends the current state, tagged with `generation`.
    pub(crate) fn record(&mut self, generation: u64) {
        self.history.push_front(HistoryEntry {
            state: self.state,
            generation,
        });
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Normalizes any integer coordinate into `[0, size)`.
pub fn wrap_coordinate(value: i64, size: usize) -> usize {
    debug_assert!(size > 0, "cannot wrap into an empty dimension");
    value.rem_euclid(size as i64) as usize
}

/// `cols x rows` grid of cells. The outer ring is permanently dead; neighbor
/// lookups still wrap around the edges.
#[derive(Debug, Clone)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>, // column-major: index = x * rows + y
}

impl Board {
    /// Interior cells get a 50/50 random state, border cells are dead.
    pub fn initialize<R: Rng + ?Sized>(cols: usize, rows: usize, generation: u64, rng: &mut R) -> Self {
        Self::build(cols, rows, generation, |_, _| CellState::from_alive(rng.gen_bool(0.5)))
    }

    /// Every cell dead, each with a single history record.
    pub fn reset(cols: usize, rows: usize, generation: u64) -> Self {
        Self::build(cols, rows, generation, |_, _| CellState::Dead)
    }

    fn build(
        cols: usize,
        rows: usize,
        generation: u64,
        mut interior: impl FnMut(usize, usize) -> CellState,
    ) -> Self {
        let mut cells = Vec::with_capacity(cols * rows);
        for x in 0..cols {
            for y in 0..rows {
                let state = if is_border(x, y, cols, rows) {
                    CellState::Dead
                } else {
                    interior(x, y)
                };
                cells.push(Cell::new(state, generation));
            }
        }
        Self { cols, rows, cells }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        is_border(x, y, self.cols, self.rows)
    }

    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) && !self.is_border(x, y)
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| x * self.rows + y)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// State at `(x, y)`, dead when out of range.
    pub fn state(&self, x: usize, y: usize) -> CellState {
        self.cell(x, y).map_or(CellState::Dead, Cell::state)
    }

    /// Marks an interior cell alive. Border and out-of-range coordinates are
    /// ignored; returns whether the edit was applied.
    pub fn set_cell_alive(&mut self, x: usize, y: usize) -> bool {
        if !self.is_interior(x, y) {
            tracing::trace!(x, y, "ignoring edit outside the interior");
            return false;
        }
        match self.cell_mut(x, y) {
            Some(cell) => {
                cell.set_state(CellState::Alive);
                true
            }
            None => false,
        }
    }

    /// Live neighbors of `(x, y)` with every neighbor coordinate wrapped
    /// independently, so border cells see the opposite edge. Zero for
    /// coordinates outside the board.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        if !self.contains(x, y) {
            return 0;
        }
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| {
                let col = wrap_coordinate(x as i64 + dx, self.cols);
                let row = wrap_coordinate(y as i64 + dy, self.rows);
                self.state(col, row).as_u8()
            })
            .sum()
    }

    /// Full scan of the grid.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell, column by column.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        let rows = self.rows;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / rows, i % rows), cell))
    }

    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let (cols, rows) = (self.cols, self.rows);
        (1..cols.saturating_sub(1)).flat_map(move |x| (1..rows.saturating_sub(1)).map(move |y| (x, y)))
    }

    /// Hash of every cell state, for cycle detection.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cols.hash(&mut hasher);
        self.rows.hash(&mut hasher);
        for cell in &self.cells {
            cell.state.hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn is_border(x: usize, y: usize, cols: usize, rows: usize) -> bool {
    x == 0 || y == 0 || x + 1 >= cols || y + 1 >= rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board_with(cols: usize, rows: usize, alive: &[(usize, usize)]) -> Board {
        let mut board = Board::reset(cols, rows, 0);
        for &(x, y) in alive {
            board.cell_mut(x, y).unwrap().set_state(CellState::Alive);
        }
        board
    }

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(-1, 4), 3);
        assert_eq!(wrap_coordinate(4, 4), 0);
        assert_eq!(wrap_coordinate(-9, 4), 3);
        assert_eq!(wrap_coordinate(2, 4), 2);
    }

    #[test]
    fn test_neighbors_wrap_across_corner() {
        let board = board_with(4, 4, &[(3, 3)]);
        assert_eq!(board.count_neighbors(0, 0), 1);

        let board = board_with(4, 4, &[(3, 3), (3, 0), (0, 3)]);
        assert_eq!(board.count_neighbors(0, 0), 3);
    }

    #[test]
    fn test_neighbors_exclude_self() {
        let board = board_with(5, 5, &[(2, 2)]);
        assert_eq!(board.count_neighbors(2, 2), 0);
        assert_eq!(board.count_neighbors(1, 1), 1);
    }

    #[test]
    fn test_neighbors_out_of_range() {
        let board = board_with(4, 4, &[(3, 3)]);
        assert_eq!(board.count_neighbors(4, 0), 0);
        assert_eq!(board.count_neighbors(usize::MAX, usize::MAX), 0);
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8u8 {
            let born = CellState::Dead.next(n);
            assert_eq!(born.is_alive(), n == 3, "dead cell with {n} neighbors");
            let kept = CellState::Alive.next(n);
            assert_eq!(kept.is_alive(), n == 2 || n == 3, "live cell with {n} neighbors");
        }
    }

    #[test]
    fn test_initialize_keeps_border_dead() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let board = Board::initialize(9, 6, 0, &mut rng);
        for ((x, y), cell) in board.iter() {
            assert_eq!(cell.history().len(), 1);
            if board.is_border(x, y) {
                assert_eq!(cell.state(), CellState::Dead);
            }
            assert_eq!(cell.history()[0].state, cell.state());
        }
    }

    #[test]
    fn test_reset_is_all_dead() {
        let board = Board::reset(6, 4, 0);
        assert_eq!(board.live_count(), 0);
        for (_, cell) in board.iter() {
            assert_eq!(
                cell.history().iter().copied().collect::<Vec<_>>(),
                vec![HistoryEntry { state: CellState::Dead, generation: 0 }]
            );
        }
    }

    #[test]
    fn test_set_cell_alive_ignores_border() {
        let mut board = Board::reset(5, 5, 0);
        assert!(!board.set_cell_alive(0, 2));
        assert!(!board.set_cell_alive(4, 2));
        assert!(!board.set_cell_alive(2, 4));
        assert!(!board.set_cell_alive(17, 1));
        assert_eq!(board.live_count(), 0);

        assert!(board.set_cell_alive(2, 3));
        assert_eq!(board.live_cells(), vec![(2, 3)]);
    }

    #[test]
    fn test_live_fraction() {
        let mut cell = Cell::new(CellState::Alive, 0);
        cell.set_state(CellState::Dead);
        cell.record(1);
        cell.record(2);
        cell.set_state(CellState::Alive);
        cell.record(3);
        assert!((cell.live_fraction() - 0.5).abs() < f64::EPSILON);

        cell.history.clear();
        assert_eq!(cell.live_fraction(), 0.0);
    }

    #[test]
    fn test_interior_iteration() {
        let board = Board::reset(4, 3, 0);
        assert_eq!(board.interior().collect::<Vec<_>>(), vec![(1, 1), (2, 1)]);
    }
}
