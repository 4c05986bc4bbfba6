//! Session actor message types.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::{
    draw::{DrawError, DrawPhase, DrawRecord, DrawResult, RaffleEvent},
    pool::Participant,
    reel::{DrawId, ReelPlan},
};

/// Most recent draws carried in a [`SessionSnapshot`]
pub const SNAPSHOT_HISTORY_LIMIT: usize = 10;

/// Subscriber key for notification fan-out
pub type SubscriberId = u64;

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Merge a batch of registration candidates
    Merge {
        candidates: Vec<Participant>,
        response: oneshot::Sender<usize>,
    },

    /// Pick a winner and start spinning
    StartDraw {
        response: oneshot::Sender<DrawResult<Arc<ReelPlan>>>,
    },

    /// Renderer finished animating `draw_id`
    AnimationComplete {
        draw_id: DrawId,
        response: oneshot::Sender<bool>,
    },

    /// Commit the revealed winner and go back to idle
    NextRound {
        response: oneshot::Sender<DrawResult<Arc<Participant>>>,
    },

    /// Make the whole registry eligible again
    ResetPool {
        response: oneshot::Sender<usize>,
    },

    /// Get current session state
    GetSnapshot {
        response: oneshot::Sender<SessionSnapshot>,
    },

    /// Registration source became unreachable
    SourceFailed { reason: String },

    /// Registration source is reachable again
    SourceRestored,

    /// Subscribe to notifications
    Subscribe {
        subscriber_id: SubscriberId,
        sender: mpsc::Sender<RaffleEvent>,
    },

    /// Unsubscribe from notifications
    Unsubscribe { subscriber_id: SubscriberId },

    /// Tear the session down
    Close { response: oneshot::Sender<()> },
}

/// Events emitted by an external registration source
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// New or re-delivered registrations
    Upsert(Vec<Participant>),
    /// Source unreachable or access denied
    Failed(String),
    /// Source reachable again
    Restored,
}

/// Point-in-time view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub phase: DrawPhase,
    pub registry_count: usize,
    pub available_count: usize,

    /// Display name of the drawn winner while spinning or ended
    pub current_winner: Option<String>,
    pub draw_id: Option<DrawId>,

    /// Registration source reported a failure and hasn't recovered
    pub degraded: bool,

    /// Draws committed over the session's lifetime
    pub draws_completed: usize,
    /// Up to [`SNAPSHOT_HISTORY_LIMIT`] most recent draws, oldest first
    pub recent_history: Vec<DrawRecord>,
}

/// Errors returned through a [`SessionHandle`](super::SessionHandle)
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SessionError {
    /// Actor has shut down
    #[error("raffle session is closed")]
    Closed,

    /// Draw rejected by the state machine
    #[error(transparent)]
    Draw(#[from] DrawError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
