//! Encoding and query-construction configuration.
//!
//! Configuration is immutable after construction and shared read-only across
//! encoders and query builders, so concurrent callers need no coordination.

use crate::error::{GridQueryError, Result};
use serde::{Deserialize, Serialize};

/// Deepest geohash resolution the grid supports.
pub const MAX_GRID_DEPTH: usize = 12;

/// Configuration shared by field encoding and query construction.
///
/// Loadable from JSON or any other serde format, with per-field defaults.
///
/// # Example
///
/// ```rust
/// use gridquery::Config;
///
/// let config = Config::default().with_field("footprint");
///
/// let json = r#"{
///     "field": "footprint",
///     "max_indexed_length": 6,
///     "grid_depth": 9
/// }"#;
/// let loaded: Config = serde_json::from_str(json).unwrap();
/// loaded.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Indexed field name the generated clauses target.
    #[serde(default = "Config::default_field")]
    pub field: String,

    /// Maximum indexed token length; 0 means tokens are indexed untruncated.
    #[serde(default)]
    pub max_indexed_length: usize,

    /// Grid decomposition depth cap (1-12).
    #[serde(default = "Config::default_grid_depth")]
    pub grid_depth: usize,

    /// Upper bound on cells produced by a single shape decomposition.
    #[serde(default = "Config::default_max_covering_cells")]
    pub max_covering_cells: usize,
}

impl Config {
    fn default_field() -> String {
        "geo".to_string()
    }

    const fn default_grid_depth() -> usize {
        8
    }

    const fn default_max_covering_cells() -> usize {
        4096
    }

    /// Target a different indexed field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Truncate indexed tokens to at most `len` characters (0 = unlimited).
    pub fn with_max_indexed_length(mut self, len: usize) -> Self {
        self.max_indexed_length = len;
        self
    }

    /// Set the grid decomposition depth cap.
    pub fn with_grid_depth(mut self, depth: usize) -> Self {
        assert!(
            (1..=MAX_GRID_DEPTH).contains(&depth),
            "Grid depth must be between 1 and {}",
            MAX_GRID_DEPTH
        );
        self.grid_depth = depth;
        self
    }

    /// Bound the number of cells a single decomposition may produce.
    pub fn with_max_covering_cells(mut self, cells: usize) -> Self {
        assert!(cells > 0, "Covering cell cap must be greater than zero");
        self.max_covering_cells = cells;
        self
    }

    /// Validate configuration values, for configs arriving via serde.
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(GridQueryError::InvalidInput(
                "field name must not be empty".to_string(),
            ));
        }

        if !(1..=MAX_GRID_DEPTH).contains(&self.grid_depth) {
            return Err(GridQueryError::InvalidInput(format!(
                "grid depth must be between 1 and {}",
                MAX_GRID_DEPTH
            )));
        }

        if self.max_indexed_length > MAX_GRID_DEPTH {
            return Err(GridQueryError::InvalidInput(format!(
                "max indexed length must be 0 (unlimited) or at most {}",
                MAX_GRID_DEPTH
            )));
        }

        if self.max_covering_cells == 0 {
            return Err(GridQueryError::InvalidInput(
                "covering cell cap must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: Self::default_field(),
            max_indexed_length: 0,
            grid_depth: Self::default_grid_depth(),
            max_covering_cells: Self::default_max_covering_cells(),
        }
    }
}
