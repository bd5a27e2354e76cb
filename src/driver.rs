// driver.rs - Tick scheduling around the synchronous engine

use crate::config;
use crate::engine::SimulationEngine;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Repeating-tick gate for a frame-driven host (the egui loop).
///
/// The driver never steps the engine itself; the host asks `is_due` each
/// frame and calls `mark_ticked` after stepping.
#[derive(Debug, Clone)]
pub struct TickDriver {
    is_running: bool,
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            is_running: false,
            interval,
            last_tick: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starting a running driver is a no-op and returns false. A freshly
    /// started driver is due immediately.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        self.last_tick = None;
        tracing::debug!("Tick driver started");
        true
    }

    /// Only gates future ticks; returns whether the driver was running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        tracing::debug!("Tick driver stopped");
        true
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.is_running
            && self
                .last_tick
                .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn mark_ticked(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Ignores rates that give no usable interval.
    pub fn set_ticks_per_second(&mut self, ticks_per_second: f64) {
        if let Some(interval) = config::interval_for(ticks_per_second) {
            self.interval = interval;
        }
    }

    pub fn ticks_per_second(&self) -> f64 {
        1.0 / self.interval.as_secs_f64()
    }
}

/// Remembers the last few grid hashes to spot still lifes and short oscillators.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    grid_history: [u64; 10],
    history_count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `hash` matches one of the recent grids.
    pub fn observe(&mut self, hash: u64) -> bool {
        let seen = self.grid_history[..self.history_count.min(self.grid_history.len())].contains(&hash);
        if seen {
            return true;
        }
        let slot = self.history_count % self.grid_history.len();
        self.grid_history[slot] = hash;
        self.history_count += 1;
        false
    }
}

/// Why `run_ticks` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    GenerationLimit,
    CycleDetected,
}

/// Steps `engine` once per `interval` until shutdown is signalled, the
/// generation limit is reached, or (with `stop_on_cycle`) the grid repeats.
///
/// The first tick fires immediately. Each step runs to completion before the
/// next tick is awaited, so ticks never overlap.
pub async fn run_ticks(
    engine: &mut SimulationEngine,
    interval: Duration,
    max_generations: Option<u64>,
    stop_on_cycle: bool,
    mut shutdown: watch::Receiver<bool>,
) -> StopReason {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_nanos(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut cycles = CycleDetector::new();
    cycles.observe(engine.state_hash());

    loop {
        if max_generations.is_some_and(|max| engine.generation_count() >= max) {
            return StopReason::GenerationLimit;
        }
        if *shutdown.borrow() {
            return StopReason::Shutdown;
        }

        tokio::select! {
            _ = ticker.tick() => {
                engine.step();
                if stop_on_cycle && cycles.observe(engine.state_hash()) {
                    tracing::info!(generation = engine.generation_count(), "Grid repeats, stopping");
                    return StopReason::CycleDetected;
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return StopReason::Shutdown;
                }
            }
        }
    }
}
