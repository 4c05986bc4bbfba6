//! Draw engine - secure selection and the round state machine.
//!
//! This module provides:
//! - `SecureSelector`: unbiased picks and shuffles from the OS CSPRNG
//! - `RaffleState`: Idle → Spinning → Ended → Idle state machine
//! - `RaffleEvent`: notifications for the user-facing sink
//! - `DrawRecord`: in-memory history of committed draws
//!
//! ## Example
//!
//! ```
//! use raffle::draw::{DrawPhase, DrawStateManagement, PoolManagement, RaffleState};
//! use raffle::pool::Participant;
//!
//! let mut raffle = RaffleState::new();
//! raffle.merge(vec![Participant::imported("Ann", "Lee"), Participant::imported("Bo", "Kim")]);
//!
//! let plan = raffle.start_draw().unwrap();
//! assert_eq!(raffle.phase(), DrawPhase::Spinning);
//!
//! // The renderer reports back once the reel stops
//! raffle.animation_complete(plan.draw_id);
//! let winner = raffle.next_round().unwrap();
//! assert_eq!(winner.id, plan.winner().id);
//! assert_eq!(raffle.pool().available_len(), 1);
//! ```

pub mod errors;
pub mod events;
pub mod selector;
pub mod state_machine;

pub use errors::{DrawError, DrawResult, SelectorError, SelectorResult};
pub use events::{DrawRecord, RaffleEvent};
pub use selector::SecureSelector;
pub use state_machine::{
    Draw, DrawData, DrawPhase, DrawStateManagement, Ended, Idle, PhaseState, PoolManagement,
    RaffleState, Spinning,
};
