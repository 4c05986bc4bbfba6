//! # Raffle
//!
//! A live prize drawing engine built around a type-safe finite state machine.
//!
//! Participants are admitted into a registry by file import or remote
//! registration. Each draw picks one participant from the still-available
//! pool with an OS-backed CSPRNG and lays out a reel animation that always
//! stops on the winner. Winners leave the pool until everyone has won once,
//! at which point the pool refills.
//!
//! ## Architecture
//!
//! - **Idle**: waiting for a draw request
//! - **Spinning**: winner chosen, reel animating
//! - **Ended**: animation finished, winner on display
//!
//! Committing the next round removes the winner and returns to Idle.
//!
//! ## Core Modules
//!
//! - [`pool`]: participants, registry and available pool
//! - [`draw`]: secure selector and the draw state machine
//! - [`reel`]: reel sequence and scroll target planning
//! - [`session`]: async actor owning one live session
//! - [`import`]: CSV participant import
//!
//! ## Example
//!
//! ```
//! use raffle::{PoolManagement, RaffleState, pool::Participant};
//!
//! let mut raffle = RaffleState::new();
//! raffle.merge(vec![Participant::imported("Ann", "Lee")]);
//! let plan = raffle.start_draw().unwrap();
//! assert_eq!(plan.winner().display_name, "Ann L.");
//! ```

/// Participant registry and available pool.
pub mod pool;

/// Secure selection and the draw state machine.
pub mod draw;
pub use draw::{
    DrawError, DrawPhase, DrawStateManagement, PoolManagement, RaffleEvent, RaffleState,
};

/// Reel animation planning.
pub mod reel;
pub use reel::{ReelConfig, ReelPlan};

/// Single-session async actor.
pub mod session;

/// CSV participant import.
pub mod import;
