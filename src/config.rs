use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Largest board accepted, in cells.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows; columns are derived through `aspect_ratio`.
    pub grid_dimension: usize,
    pub aspect_ratio: f64,
    pub ticks_per_second: f64,
    /// Side of one cell on screen, in points.
    pub cell_size: f32,
    /// Fixed RNG seed for reproducible boards.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_dimension: 60,
            aspect_ratio: 1.5,
            ticks_per_second: 3.0,
            cell_size: 12.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads `path`, falling back to defaults only when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects non-positive values instead of silently substituting defaults.
    pub fn validate(&self) -> Result<()> {
        if self.grid_dimension == 0 {
            return Err(LifeError::invalid_config("grid_dimension", "must be positive, got 0"));
        }
        check_positive("aspect_ratio", self.aspect_ratio)?;
        check_positive("ticks_per_second", self.ticks_per_second)?;
        check_positive("cell_size", f64::from(self.cell_size))?;
        if interval_for(self.ticks_per_second).is_none() {
            return Err(LifeError::invalid_config(
                "ticks_per_second",
                format!("gives no usable tick interval, got {}", self.ticks_per_second),
            ));
        }

        let (cols, rows) = self.dimensions();
        check_board_size(cols, rows)
    }

    /// `(cols, rows)` with `cols = floor(grid_dimension * aspect_ratio)`.
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = (self.grid_dimension as f64 * self.aspect_ratio).floor() as usize;
        (cols, self.grid_dimension)
    }

    /// Period between ticks. Falls back to one second for rates `validate` rejects.
    pub fn tick_interval(&self) -> Duration {
        interval_for(self.ticks_per_second).unwrap_or(Duration::from_secs(1))
    }
}

/// `1 / ticks_per_second` as a non-zero `Duration`, if representable.
pub fn interval_for(ticks_per_second: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(1.0 / ticks_per_second)
        .ok()
        .filter(|interval| !interval.is_zero())
}

/// Rejects boards with no cells or more than `MAX_CELLS`.
pub fn check_board_size(cols: usize, rows: usize) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Err(LifeError::EmptyBoard { cols, rows });
    }
    match cols.checked_mul(rows) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(LifeError::invalid_config(
            "grid_dimension",
            format!("gives a {cols}x{rows} board, above {MAX_CELLS} cells"),
        )),
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LifeError::invalid_config(field, format!("must be positive, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dimensions(), (90, 60));
        assert_eq!(config.tick_interval(), Duration::from_secs_f64(1.0 / 3.0));
    }

    #[test]
    fn test_dimensions_floor() {
        let config = GameConfig {
            grid_dimension: 10,
            aspect_ratio: 1.75,
            ..GameConfig::default()
        };
        assert_eq!(config.dimensions(), (17, 10));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("grid_dimension = 12\nseed = 42\n").unwrap();
        assert_eq!(config.grid_dimension, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.aspect_ratio, 1.5);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let err = GameConfig::from_toml_str("grid_dimension = 0").unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig { field: "grid_dimension", .. }));

        let err = GameConfig::from_toml_str("aspect_ratio = -1.5").unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig { field: "aspect_ratio", .. }));

        let err = GameConfig::from_toml_str("ticks_per_second = 0.0").unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig { field: "ticks_per_second", .. }));
    }

    #[test]
    fn test_rejects_empty_board() {
        let err = GameConfig::from_toml_str("grid_dimension = 1\naspect_ratio = 0.5").unwrap_err();
        assert!(matches!(err, LifeError::EmptyBoard { cols: 0, rows: 1 }));
    }

    #[test]
    fn test_rejects_unusable_tick_rates() {
        for tps in [1e-30, 1e12] {
            let config = GameConfig {
                ticks_per_second: tps,
                ..GameConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, LifeError::InvalidConfig { field: "ticks_per_second", .. }));
        }
        assert_eq!(interval_for(2.0), Some(Duration::from_millis(500)));
        assert_eq!(interval_for(1e12), None);
        assert_eq!(interval_for(1e-30), None);
    }

    #[test]
    fn test_rejects_oversized_board() {
        let config = GameConfig {
            grid_dimension: usize::MAX / 4,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig { field: "grid_dimension", .. }));

        assert!(check_board_size(4096, 4096).is_ok());
        assert!(check_board_size(4097, 4096).is_err());
        assert!(check_board_size(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("grid_dimension = \"wide\"").unwrap_err();
        assert!(matches!(err, LifeError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("toroidal_life_missing_config_test.toml");
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
