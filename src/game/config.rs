use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::state::Cell;

/// Optional stricter rules. All off by default, which keeps the classic
/// lenient behaviour: the snake may cross itself, food may land on the
/// snake, and a 180-degree turn is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Entering its own body ends the game
    pub self_collision: bool,
    /// Food is only placed on cells the snake does not occupy
    pub food_avoids_snake: bool,
    /// A pending direction opposite to the current one is ignored
    pub block_reversal: bool,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of one grid cell in viewport units
    pub cell_size: u32,
    /// Movement tick period in milliseconds
    pub move_interval_ms: u64,
    /// Elapsed-time tick period in milliseconds
    pub time_interval_ms: u64,
    /// Points awarded per food
    pub food_score: u32,
    /// Where the one-segment snake starts
    pub start_cell: Cell,
    pub start_direction: Direction,

    // Terminal viewport mapping
    /// Viewport units covered by one terminal column
    pub column_units: u32,
    /// Viewport units covered by one terminal row
    pub row_units: u32,

    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 50,
            move_interval_ms: 300,
            time_interval_ms: 1000,
            food_score: 10,
            start_cell: Cell::new(1, 3),
            start_direction: Direction::Right,
            column_units: 25,
            row_units: 50,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {:?}", path))?;
        Ok(config)
    }

    /// Reject values the game loop cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.move_interval_ms > 0, "move_interval_ms must be positive");
        ensure!(self.time_interval_ms > 0, "time_interval_ms must be positive");
        ensure!(self.column_units > 0, "column_units must be positive");
        ensure!(self.row_units > 0, "row_units must be positive");
        Ok(())
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn time_interval(&self) -> Duration {
        Duration::from_millis(self.time_interval_ms)
    }

    /// Terminal columns and rows one grid cell is drawn with. Never smaller
    /// than one character.
    pub fn cell_footprint(&self) -> (u16, u16) {
        let span = |units: u32| {
            let chars = self.cell_size.div_ceil(units.max(1)).max(1);
            u16::try_from(chars).unwrap_or(u16::MAX)
        };
        (span(self.column_units), span(self.row_units))
    }

    /// Convert a terminal area (columns, rows) into viewport units.
    ///
    /// The viewport is rounded down to whole cell footprints, so the grid
    /// derived from it always fits the area when drawn.
    pub fn viewport_for_terminal(&self, columns: u16, rows: u16) -> (u32, u32) {
        let (cell_columns, cell_rows) = self.cell_footprint();
        let across = u32::from(columns / cell_columns);
        let down = u32::from(rows / cell_rows);
        (
            across.saturating_mul(self.cell_size),
            down.saturating_mul(self.cell_size),
        )
    }
}
