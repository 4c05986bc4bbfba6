//! Raffle notifications and draw history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{pool::ParticipantId, reel::DrawId};

/// Human-facing events produced by the engine.
///
/// These feed the notification sink and carry no correctness weight.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum RaffleEvent {
    ParticipantsAdded(usize),
    NoNewParticipants,
    EmptyPool,
    DrawAlreadyInProgress,
    WinnerDrawn { draw_id: DrawId, display_name: String },
    WinnerRevealed { draw_id: DrawId, full_name: String },
    /// Every participant won once; the pool was refilled.
    RoundComplete { registry: usize },
    PoolReset { available: usize },
    SourceUnavailable(String),
    SourceRestored,
}

impl fmt::Display for RaffleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::ParticipantsAdded(count) => {
                format!("{count} new participants have been added to the raffle")
            }
            Self::NoNewParticipants => {
                "the imported participants are already in the raffle".to_string()
            }
            Self::EmptyPool => "raffle is empty, add participants before starting".to_string(),
            Self::DrawAlreadyInProgress => {
                "a draw is already in progress, finish the current round first".to_string()
            }
            Self::WinnerDrawn {
                draw_id,
                display_name,
            } => format!("draw #{draw_id} spinning for {display_name}"),
            Self::WinnerRevealed { draw_id, full_name } => {
                format!("draw #{draw_id}: congratulations {full_name}!")
            }
            Self::RoundComplete { registry } => {
                format!("round complete, resetting pool to all {registry} participants")
            }
            Self::PoolReset { available } => {
                format!("pool reset, {available} participants available")
            }
            Self::SourceUnavailable(reason) => {
                format!("registration source unavailable: {reason}")
            }
            Self::SourceRestored => "registration source restored".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// A committed draw. Kept in memory for the session only.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DrawRecord {
    pub draw_id: DrawId,
    pub winner: ParticipantId,
    pub full_name: String,
    pub drawn_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        assert_eq!(
            RaffleEvent::ParticipantsAdded(3).to_string(),
            "3 new participants have been added to the raffle"
        );
        assert_eq!(
            RaffleEvent::RoundComplete { registry: 4 }.to_string(),
            "round complete, resetting pool to all 4 participants"
        );
        assert!(
            RaffleEvent::SourceUnavailable("permission denied".to_string())
                .to_string()
                .contains("permission denied")
        );
    }
}
