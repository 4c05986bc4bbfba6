//! Session module providing a single live raffle as an async actor.
//!
//! This module implements:
//! - SessionActor: owns the raffle engine for one session
//! - SessionHandle: cloneable sender with request/response helpers
//! - Registration source forwarding (upsert batches, failures)
//! - Notification fan-out to subscribers
//! - ReelRenderer: seam for the animation collaborator
//!
//! ## Architecture
//!
//! The actor runs in its own Tokio task and processes one message at a
//! time, so draws, merges and completion signals never interleave. The
//! animation completion signal is just another message on the inbox.
//!
//! ## Example
//!
//! ```
//! use raffle::pool::Participant;
//! use raffle::session::{InstantRenderer, SessionActor, SessionConfig, draw_with};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (_task, handle) = SessionActor::spawn(SessionConfig::default());
//!     handle
//!         .merge(vec![Participant::register("Ann", "Lee")?])
//!         .await?;
//!
//!     let winner = draw_with(&handle, &InstantRenderer).await?;
//!     println!("Congratulations {}!", winner.full_name());
//!     handle.next_round().await?;
//!     handle.close().await?;
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;
pub mod renderer;

pub use actor::{SessionActor, SessionHandle};
pub use config::SessionConfig;
pub use messages::{
    SNAPSHOT_HISTORY_LIMIT, SessionError, SessionMessage, SessionResult, SessionSnapshot,
    SourceEvent, SubscriberId,
};
pub use renderer::{InstantRenderer, ReelRenderer, draw_with};
