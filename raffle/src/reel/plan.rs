//! Reel sequence builder.

use std::{sync::Arc, time::Duration};

use super::{
    config::ReelConfig,
    errors::{ReelError, ReelResult},
};
use crate::{
    draw::SecureSelector,
    pool::{Participant, ParticipantId},
};

/// Monotonic draw counter tying a completion signal to its plan.
pub type DrawId = u64;

/// Render instruction for one draw's animation.
///
/// Built once per draw and never mutated afterwards, so registry changes
/// during a spin can't move the landing position.
#[derive(Debug, Clone, PartialEq)]
pub struct ReelPlan {
    pub draw_id: DrawId,

    /// Tokens from top to bottom: the shuffled pool repeated `repetitions` times.
    pub sequence: Vec<Arc<Participant>>,

    /// Index of the winner token the reel stops on.
    pub target_index: usize,

    /// Final vertical translation in pixels that centers `target_index`.
    pub target_offset: i64,

    pub row_height: u32,
    pub viewport_rows: u32,
    pub spin_duration: Duration,
}

impl ReelPlan {
    /// Shuffle the pool once and lay out the reel around `winner`.
    ///
    /// # Errors
    ///
    /// * [`ReelError::EmptyPool`] - `available` is empty
    /// * [`ReelError::WinnerNotInPool`] - `winner` isn't in `available`
    /// * [`ReelError::InvalidConfig`] - `config` fails validation
    pub fn build(
        draw_id: DrawId,
        available: &[Arc<Participant>],
        winner: &ParticipantId,
        config: &ReelConfig,
        selector: &mut SecureSelector,
    ) -> ReelResult<Self> {
        let mut base = available.to_vec();
        selector.shuffle(&mut base);
        Self::from_base(draw_id, base, winner, config)
    }

    /// Lay out the reel from an already shuffled base ordering.
    ///
    /// The same inputs always produce the same plan, which makes a draw
    /// replayable from its base ordering.
    pub fn from_base(
        draw_id: DrawId,
        base: Vec<Arc<Participant>>,
        winner: &ParticipantId,
        config: &ReelConfig,
    ) -> ReelResult<Self> {
        config.validate().map_err(ReelError::InvalidConfig)?;

        if base.is_empty() {
            return Err(ReelError::EmptyPool);
        }

        let capacity = base.len().checked_mul(config.repetitions).ok_or_else(|| {
            ReelError::InvalidConfig(format!(
                "{} participants x {} repetitions overflows the reel",
                base.len(),
                config.repetitions
            ))
        })?;

        let mut sequence = Vec::with_capacity(capacity);
        for _ in 0..config.repetitions {
            sequence.extend(base.iter().cloned());
        }

        let target_index = landing_index(&sequence, winner)
            .ok_or_else(|| ReelError::WinnerNotInPool(winner.clone()))?;

        let row_height = i64::from(config.row_height);
        let target_offset = -(target_index as i64 * row_height) + config.center_offset();

        Ok(Self {
            draw_id,
            sequence,
            target_index,
            target_offset,
            row_height: config.row_height,
            viewport_rows: config.viewport_rows,
            spin_duration: config.spin_duration,
        })
    }

    /// The participant the reel lands on.
    pub fn winner(&self) -> &Arc<Participant> {
        &self.sequence[self.target_index]
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Rows visible when `center` sits in the middle of the viewport.
    ///
    /// Clipped at the ends of the sequence.
    pub fn visible_around(&self, center: usize) -> &[Arc<Participant>] {
        let half = (self.viewport_rows as usize).saturating_sub(1) / 2;
        let start = center.saturating_sub(half);
        let end = (center + half + 1).min(self.sequence.len());
        &self.sequence[start.min(end)..end]
    }
}

/// First winner occurrence in the second half, falling back to the first
/// occurrence anywhere.
fn landing_index(sequence: &[Arc<Participant>], winner: &ParticipantId) -> Option<usize> {
    let len = sequence.len();
    sequence
        .iter()
        .enumerate()
        .position(|(idx, p)| &p.id == winner && 2 * idx >= len)
        .or_else(|| sequence.iter().position(|p| &p.id == winner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Origin;

    fn pool(ids: &[&str]) -> Vec<Arc<Participant>> {
        ids.iter()
            .map(|id| Arc::new(Participant::new(*id, id, "Test", Origin::Registration)))
            .collect()
    }

    #[test]
    fn test_plan_lands_in_second_half() {
        let base = pool(&["p1", "p2", "p3"]);
        let winner = ParticipantId::new("p2");
        let plan = ReelPlan::from_base(1, base, &winner, &ReelConfig::default()).unwrap();

        assert_eq!(plan.len(), 30);
        // p2 sits at 1, 4, 7, ...; first one at or past 15 is 16
        assert_eq!(plan.target_index, 16);
        assert_eq!(plan.winner().id, winner);
        assert_eq!(plan.target_offset, -(16 * 80) + 80);
    }

    #[test]
    fn test_plan_is_deterministic_for_base() {
        let base = pool(&["a", "b", "c", "d"]);
        let winner = ParticipantId::new("c");
        let config = ReelConfig::default();
        let first = ReelPlan::from_base(7, base.clone(), &winner, &config).unwrap();
        let second = ReelPlan::from_base(7, base, &winner, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_participant_reel() {
        let base = pool(&["solo"]);
        let winner = ParticipantId::new("solo");
        let plan = ReelPlan::from_base(1, base, &winner, &ReelConfig::default()).unwrap();

        assert_eq!(plan.len(), 10);
        assert!(plan.sequence.iter().all(|p| p.id == winner));
        assert_eq!(plan.target_index, 5);
    }

    #[test]
    fn test_single_repetition_falls_back_to_first_occurrence() {
        let config = ReelConfig {
            repetitions: 1,
            ..ReelConfig::default()
        };
        let base = pool(&["solo"]);
        let winner = ParticipantId::new("solo");
        let plan = ReelPlan::from_base(1, base, &winner, &config).unwrap();

        assert_eq!(plan.target_index, 0);
        assert_eq!(plan.target_offset, 80);
    }

    #[test]
    fn test_missing_winner_rejected() {
        let base = pool(&["p1", "p2"]);
        let err = ReelPlan::from_base(1, base, &ParticipantId::new("p9"), &ReelConfig::default())
            .unwrap_err();
        assert_eq!(err, ReelError::WinnerNotInPool(ParticipantId::new("p9")));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = ReelPlan::from_base(1, Vec::new(), &ParticipantId::new("p1"), &ReelConfig::default())
            .unwrap_err();
        assert_eq!(err, ReelError::EmptyPool);
    }

    #[test]
    fn test_five_row_viewport_offset() {
        let config = ReelConfig {
            viewport_rows: 5,
            ..ReelConfig::default()
        };
        let base = pool(&["p1", "p2"]);
        let plan = ReelPlan::from_base(1, base, &ParticipantId::new("p1"), &config).unwrap();

        assert_eq!(plan.target_index, 10);
        assert_eq!(plan.target_offset, -(10 * 80) + 160);
        assert_eq!(plan.visible_around(plan.target_index).len(), 5);
        assert_eq!(plan.visible_around(plan.target_index)[2].id.as_str(), "p1");
    }

    #[test]
    fn test_build_shuffles_but_keeps_members() {
        let available = pool(&["p1", "p2", "p3", "p4"]);
        let winner = ParticipantId::new("p3");
        let mut selector = SecureSelector::new();
        let plan =
            ReelPlan::build(2, &available, &winner, &ReelConfig::default(), &mut selector).unwrap();

        assert_eq!(plan.len(), 40);
        assert!(2 * plan.target_index >= plan.len());
        assert_eq!(plan.winner().id, winner);

        // Each repetition is the same permutation of the pool
        let first: Vec<_> = plan.sequence[..4].iter().map(|p| p.id.clone()).collect();
        for chunk in plan.sequence.chunks(4) {
            let ids: Vec<_> = chunk.iter().map(|p| p.id.clone()).collect();
            assert_eq!(ids, first);
        }
    }

    #[test]
    fn test_oversized_repetitions_rejected_without_panic() {
        let base = pool(&["p1", "p2"]);
        let config = ReelConfig {
            repetitions: usize::MAX / 2,
            ..ReelConfig::default()
        };
        let result = ReelPlan::from_base(1, base, &ParticipantId::new("p1"), &config);
        assert!(matches!(result, Err(ReelError::InvalidConfig(_))));
    }

    #[test]
    fn test_visible_around_zero_viewport() {
        let base = pool(&["p1", "p2", "p3"]);
        let mut plan =
            ReelPlan::from_base(1, base, &ParticipantId::new("p2"), &ReelConfig::default())
                .unwrap();
        plan.viewport_rows = 0;

        let rows = plan.visible_around(plan.target_index);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, ParticipantId::new("p2"));
    }
}
