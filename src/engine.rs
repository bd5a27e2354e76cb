// engine.rs - Generation stepping, per-cell history and live statistics

use crate::config::{self, GameConfig};
use crate::error::Result;
use crate::grid::{Board, Cell, CellState, HistoryEntry};
use crate::patterns::Pattern;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Owns the board for one run together with the generation and live counters.
///
/// `step`, `clear`, `randomize`, `apply_pattern` and `set_cell_alive` are the
/// only mutators. Cells keep their position in the board across steps, so a
/// coordinate held by a viewer keeps pointing at the same cell until `clear`.
#[derive(Debug)]
pub struct SimulationEngine {
    board: Board,
    generation_count: u64,
    live_count: usize,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    /// Validates `config` and starts from a random board.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let (cols, rows) = config.dimensions();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(cols, rows, rng)
    }

    pub fn with_rng(cols: usize, rows: usize, mut rng: ChaCha8Rng) -> Result<Self> {
        config::check_board_size(cols, rows)?;
        let board = Board::initialize(cols, rows, 0, &mut rng);
        let live_count = board.live_count();
        tracing::info!(cols, rows, live_count, "Initialized board");
        Ok(Self {
            board,
            generation_count: 0,
            live_count,
            rng,
        })
    }

    /// All-dead board of the given size.
    pub fn empty(cols: usize, rows: usize) -> Result<Self> {
        let mut engine = Self::with_rng(cols, rows, ChaCha8Rng::seed_from_u64(0))?;
        engine.clear();
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generation_count(&self) -> u64 {
        self.generation_count
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.board.cell(x, y)
    }

    /// History of the cell at `(x, y)`, newest first.
    pub fn cell_history(&self, x: usize, y: usize) -> Option<&VecDeque<HistoryEntry>> {
        self.board.cell(x, y).map(Cell::history)
    }

    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        self.board.count_neighbors(x, y)
    }

    pub fn count_live_fraction(&self, cell: &Cell) -> f64 {
        cell.live_fraction()
    }

    pub fn state_hash(&self) -> u64 {
        self.board.state_hash()
    }

    /// Advances exactly one generation.
    ///
    /// Every interior cell first gets its next state from the current grid.
    /// Then each one records the state it held during the generation being
    /// completed and takes its new state. Border cells are left untouched.
    pub fn step(&mut self) {
        let next: Vec<((usize, usize), CellState)> = self
            .board
            .interior()
            .map(|(x, y)| {
                let neighbors = self.board.count_neighbors(x, y);
                ((x, y), self.board.state(x, y).next(neighbors))
            })
            .collect();

        let completed = self.generation_count;
        for ((x, y), state) in next {
            if let Some(cell) = self.board.cell_mut(x, y) {
                cell.record(completed);
                cell.set_state(state);
            }
        }

        self.generation_count += 1;
        self.live_count = self.board.live_count();
        tracing::debug!(
            generation = self.generation_count,
            live = self.live_count,
            "Advanced generation"
        );
    }

    /// Back to generation 0 with every cell dead, discarding all history.
    pub fn clear(&mut self) {
        self.board = Board::reset(self.board.cols(), self.board.rows(), 0);
        self.generation_count = 0;
        self.live_count = 0;
        tracing::info!("Cleared board");
    }

    /// Back to generation 0 with a fresh random interior.
    pub fn randomize(&mut self) {
        self.board = Board::initialize(self.board.cols(), self.board.rows(), 0, &mut self.rng);
        self.generation_count = 0;
        self.live_count = self.board.live_count();
        tracing::info!(live = self.live_count, "Randomized board");
    }

    /// Manual edit. Only interior cells are accepted; anything else is a no-op.
    pub fn set_cell_alive(&mut self, x: usize, y: usize) -> bool {
        let applied = self.board.set_cell_alive(x, y);
        if applied {
            self.live_count = self.board.live_count();
        }
        applied
    }

    /// Clears the board and seeds `pattern` with its offsets added to `origin`.
    /// Returns how many cells were placed inside the interior.
    pub fn apply_pattern(&mut self, pattern: &Pattern, origin: (usize, usize)) -> usize {
        self.clear();
        let placed = pattern
            .cells
            .iter()
            .filter(|&&(dx, dy)| match (origin.0.checked_add(dx), origin.1.checked_add(dy)) {
                (Some(x), Some(y)) => self.set_cell_alive(x, y),
                _ => false,
            })
            .count();
        tracing::info!(pattern = pattern.name, placed, "Applied pattern");
        placed
    }
}
