//! Reel animation planning.
//!
//! Turns the available pool and a chosen winner into a long, shuffled token
//! sequence plus the scroll target that lands the winner in the middle row
//! of the viewport. The winner token is always taken from the second half
//! of the sequence, so every spin travels at least half the reel.

pub mod config;
pub mod errors;
pub mod plan;

pub use config::{
    DEFAULT_REPETITIONS, DEFAULT_ROW_HEIGHT, DEFAULT_SPIN_DURATION, DEFAULT_VIEWPORT_ROWS,
    MAX_REPETITIONS, ReelConfig,
};
pub use errors::{ReelError, ReelResult};
pub use plan::{DrawId, ReelPlan};
