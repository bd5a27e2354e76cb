//! Error types for the simulation core and its configuration layer.
//!
//! Out-of-range coordinates are not errors: edits on the border or outside
//! the grid are ignored and lookups return `None`.

use thiserror::Error;

/// Main error type for toroidal_life operations.
#[derive(Error, Debug)]
pub enum LifeError {
    /// A configuration value that must be positive and finite was not
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Derived board dimensions leave no cells at all
    #[error("Board of {cols}x{rows} cells has no area")]
    EmptyBoard { cols: usize, rows: usize },

    /// The config file exists but could not be read
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// The config file is not valid TOML for `GameConfig`
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// No seed pattern with the requested name
    #[error("Unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Result type alias for toroidal_life operations.
pub type Result<T> = std::result::Result<T, LifeError>;

impl LifeError {
    /// Creates a new invalid configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
