//! Participant registry and draw-eligible pool.
//!
//! This module implements:
//! - Participant model with derived display names
//! - Registration validation for remote submissions
//! - Registry (`all`) and available pool with id-based merge
//! - Idempotent removal and super-round reset
//!
//! ## Identity
//!
//! The canonical identity key is the participant id. File imports don't
//! carry stable ids, so their ids are derived from the name, and their
//! normalized display name also counts towards duplicate detection among
//! imports. A remote registrant sharing a display name with an imported
//! participant ("Jane Doe" and "Jane Dunn" both show as "Jane D.") is a
//! separate person and both stay eligible.
//!
//! ## Example
//!
//! ```
//! use raffle::pool::{Participant, ParticipantPool};
//!
//! let mut pool = ParticipantPool::new();
//! let admitted = pool.merge(vec![
//!     Participant::imported("Ann", "Lee"),
//!     Participant::imported("Bo", "Kim"),
//! ]);
//! assert_eq!(admitted, 2);
//! assert_eq!(pool.available_len(), 2);
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{ParticipantError, ParticipantResult};
pub use manager::ParticipantPool;
pub use models::{
    MAX_NAME_LENGTH, MIN_NAME_LENGTH, Origin, Participant, ParticipantId, display_name,
    normalize_name,
};
