use crate::engine::SimulationEngine;
use crate::grid::CellState;

/// Snapshot of one cell's record for the history viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct CellHistoryView {
    pub position: (usize, usize),
    pub state: CellState,
    pub live_fraction: f64,
    /// `(generation, state)` points, oldest first.
    pub series: Vec<(u64, u8)>,
}

impl CellHistoryView {
    /// `None` for coordinates outside the board or a cell without history.
    pub fn capture(engine: &SimulationEngine, x: usize, y: usize) -> Option<Self> {
        let cell = engine.cell(x, y)?;
        if cell.history().is_empty() {
            return None;
        }
        Some(Self {
            position: (x, y),
            state: cell.state(),
            live_fraction: engine.count_live_fraction(cell),
            series: cell
                .history()
                .iter()
                .rev()
                .map(|h| (h.generation, h.state.as_u8()))
                .collect(),
        })
    }

    /// Live fraction as a percentage with one decimal, e.g. `"66.7%"`.
    pub fn alive_percentage(&self) -> String {
        format!("{:.1}%", self.live_fraction * 100.0)
    }

    pub fn state_label(&self) -> &'static str {
        if self.state.is_alive() { "Alive" } else { "Dead" }
    }
}
