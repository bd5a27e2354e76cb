// main.rs - Toroidal Game of Life with per-cell history, desktop or headless

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use toroidal_life::config::GameConfig;
use toroidal_life::driver::{self, TickDriver};
use toroidal_life::engine::SimulationEngine;
use toroidal_life::patterns;

mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (TOML); defaults are used when it does not exist
    #[arg(short, long, default_value = "life.toml")]
    config: PathBuf,

    /// Run without a window, logging statistics
    #[arg(long)]
    headless: bool,

    /// Stop the headless run after this many generations
    #[arg(short, long)]
    generations: Option<u64>,

    /// Seed for the random initial board
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a named pattern instead of a random board
    #[arg(short, long)]
    pattern: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = GameConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut engine = SimulationEngine::new(&config)?;
    if let Some(name) = &args.pattern {
        let pattern = patterns::find(name)?;
        let origin = pattern.centered_origin(engine.cols(), engine.rows());
        engine.apply_pattern(pattern, origin);
    }

    if args.headless {
        run_headless(engine, &config, args.generations)
    } else {
        run_window(engine, config)
    }
}

fn run_headless(mut engine: SimulationEngine, config: &GameConfig, generations: Option<u64>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let reason = runtime.block_on(async {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Ctrl+C received, stopping");
                let _ = shutdown_tx.send(true);
            }
        });
        driver::run_ticks(&mut engine, config.tick_interval(), generations, true, shutdown_rx).await
    });

    tracing::info!(
        ?reason,
        generation = engine.generation_count(),
        live = engine.live_count(),
        "Headless run finished"
    );
    Ok(())
}

fn run_window(engine: SimulationEngine, config: GameConfig) -> Result<()> {
    let grid_width = engine.cols() as f32 * config.cell_size;
    let grid_height = engine.rows() as f32 * config.cell_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([grid_width.max(640.0) + 40.0, grid_height + 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Toroidal Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(engine, &config))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {e}"))
}

/// Desktop host: owns the engine and is its only writer.
pub struct LifeApp {
    pub engine: SimulationEngine,
    pub driver: TickDriver,
    pub is_drawing: bool,
    pub viewed_cell: Option<(usize, usize)>,
    pub cell_size: f32,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
}

impl LifeApp {
    pub fn new(engine: SimulationEngine, config: &GameConfig) -> Self {
        Self {
            engine,
            driver: TickDriver::new(config.tick_interval()),
            is_drawing: false,
            viewed_cell: None,
            cell_size: config.cell_size,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
        }
    }

    fn clear(&mut self) {
        self.driver.stop();
        self.engine.clear();
        self.viewed_cell = None;
    }

    fn randomize(&mut self) {
        self.driver.stop();
        self.engine.randomize();
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            self.driver.stop();
            let origin = pattern.centered_origin(self.engine.cols(), self.engine.rows());
            self.engine.apply_pattern(pattern, origin);
        }
    }

    /// Pointer edits pause automatic ticking so the board has a single writer.
    fn draw_at(&mut self, x: usize, y: usize) {
        self.driver.stop();
        self.engine.set_cell_alive(x, y);
    }
}
