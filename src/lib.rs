//! Conway's Game of Life (B3/S23) on a toroidal board with a permanently
//! dead border ring, keeping a history record for every cell.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;

pub use config::GameConfig;
pub use engine::SimulationEngine;
pub use error::{LifeError, Result};
pub use grid::{Board, Cell, CellState, HistoryEntry, wrap_coordinate};
