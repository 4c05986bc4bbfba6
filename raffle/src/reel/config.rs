//! Reel geometry and timing configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of times the shuffled pool is repeated on the reel
pub const DEFAULT_REPETITIONS: usize = 10;

/// Upper bound on repetitions accepted by [`ReelConfig::validate`]
pub const MAX_REPETITIONS: usize = 100;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: u32 = 80;

/// Default number of visible rows (winner lands in the middle one)
pub const DEFAULT_VIEWPORT_ROWS: u32 = 3;

/// Default spin animation length
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_secs(8);

/// Reel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Times the shuffled pool is repeated to form the sequence
    pub repetitions: usize,

    /// Height of one reel row in pixels
    pub row_height: u32,

    /// Visible rows in the viewport (must be odd)
    pub viewport_rows: u32,

    /// Length of the deceleration animation
    pub spin_duration: Duration,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
            spin_duration: DEFAULT_SPIN_DURATION,
        }
    }
}

impl ReelConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.repetitions == 0 {
            return Err("Repetitions must be at least 1".to_string());
        }

        if self.repetitions > MAX_REPETITIONS {
            return Err(format!("Repetitions must be at most {MAX_REPETITIONS}"));
        }

        if self.row_height == 0 {
            return Err("Row height must be greater than 0".to_string());
        }

        if self.viewport_rows == 0 || self.viewport_rows % 2 == 0 {
            return Err("Viewport rows must be an odd number of at least 1".to_string());
        }

        if self.spin_duration.is_zero() {
            return Err("Spin duration must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Offset that puts row 0 in the middle of the viewport
    pub fn center_offset(&self) -> i64 {
        i64::from((self.viewport_rows - 1) / 2) * i64::from(self.row_height)
    }
}
