//! Draw state machine.
//!
//! The engine is a typestate `Draw<T>` over shared [`DrawData`], wrapped in
//! the [`RaffleState`] enum. Transitions consume the current state, so a
//! winner only exists while a draw is spinning or waiting for the next
//! round.

use chrono::{DateTime, Utc};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt, sync::Arc};

use super::{
    errors::{DrawError, DrawResult},
    events::{DrawRecord, RaffleEvent},
    selector::SecureSelector,
};
use crate::{
    pool::{Participant, ParticipantPool},
    reel::{DrawId, ReelConfig, ReelPlan},
};

/// Externally observable round phase
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawPhase {
    Idle,
    Spinning,
    Ended,
}

impl fmt::Display for DrawPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawPhase::Idle => write!(f, "idle"),
            DrawPhase::Spinning => write!(f, "spinning"),
            DrawPhase::Ended => write!(f, "ended"),
        }
    }
}

/// Session data shared across all states
#[derive(Debug)]
pub struct DrawData {
    pub(super) pool: ParticipantPool,
    pub(super) selector: SecureSelector,
    pub(super) reel: ReelConfig,
    /// Notifications waiting to be drained by the session.
    pub(super) events: VecDeque<RaffleEvent>,
    pub(super) next_draw_id: DrawId,
    /// Committed draws, oldest first.
    pub(super) history: Vec<DrawRecord>,
}

impl Default for DrawData {
    fn default() -> Self {
        ReelConfig::default().into()
    }
}

impl From<ReelConfig> for DrawData {
    fn from(value: ReelConfig) -> Self {
        Self {
            pool: ParticipantPool::new(),
            selector: SecureSelector::new(),
            reel: value,
            events: VecDeque::new(),
            next_draw_id: 1,
            history: Vec::new(),
        }
    }
}

/// No draw in flight
#[derive(Debug, Default)]
pub struct Idle;

/// Winner chosen, reel animating
#[derive(Debug)]
pub struct Spinning {
    winner: Arc<Participant>,
    plan: Arc<ReelPlan>,
    drawn_at: DateTime<Utc>,
}

/// Animation finished, winner on display
#[derive(Debug)]
pub struct Ended {
    winner: Arc<Participant>,
    draw_id: DrawId,
    drawn_at: DateTime<Utc>,
}

/// Per-state details exposed through [`DrawStateManagement`]
pub trait PhaseState {
    const PHASE: DrawPhase;

    fn winner(&self) -> Option<&Arc<Participant>> {
        None
    }

    fn plan(&self) -> Option<&Arc<ReelPlan>> {
        None
    }
}

impl PhaseState for Idle {
    const PHASE: DrawPhase = DrawPhase::Idle;
}

impl PhaseState for Spinning {
    const PHASE: DrawPhase = DrawPhase::Spinning;

    fn winner(&self) -> Option<&Arc<Participant>> {
        Some(&self.winner)
    }

    fn plan(&self) -> Option<&Arc<ReelPlan>> {
        Some(&self.plan)
    }
}

impl PhaseState for Ended {
    const PHASE: DrawPhase = DrawPhase::Ended;

    fn winner(&self) -> Option<&Arc<Participant>> {
        Some(&self.winner)
    }
}

/// Read access to the engine plus event draining
#[enum_dispatch]
pub trait DrawStateManagement {
    fn drain_events(&mut self) -> VecDeque<RaffleEvent>;
    fn phase(&self) -> DrawPhase;
    fn pool(&self) -> &ParticipantPool;
    fn reel_config(&self) -> &ReelConfig;
    fn current_winner(&self) -> Option<&Arc<Participant>>;
    /// Plan of the draw currently spinning, if any
    fn current_plan(&self) -> Option<&Arc<ReelPlan>>;
    fn history(&self) -> &[DrawRecord];
}

/// Pool mutations allowed in every phase.
///
/// Neither operation removes anyone from the available pool, so an
/// in-flight winner can't disappear before the round is committed.
#[enum_dispatch]
pub trait PoolManagement {
    /// Merge candidates; returns how many were admitted.
    fn merge(&mut self, candidates: Vec<Participant>) -> usize;
    /// Make the whole registry eligible again.
    fn reset_pool(&mut self);
}

/// A raffle session in state `T`
#[derive(Debug)]
pub struct Draw<T> {
    pub data: DrawData,
    pub state: T,
}

impl<T: PhaseState> DrawStateManagement for Draw<T> {
    fn drain_events(&mut self) -> VecDeque<RaffleEvent> {
        std::mem::take(&mut self.data.events)
    }

    fn phase(&self) -> DrawPhase {
        T::PHASE
    }

    fn pool(&self) -> &ParticipantPool {
        &self.data.pool
    }

    fn reel_config(&self) -> &ReelConfig {
        &self.data.reel
    }

    fn current_winner(&self) -> Option<&Arc<Participant>> {
        self.state.winner()
    }

    fn current_plan(&self) -> Option<&Arc<ReelPlan>> {
        self.state.plan()
    }

    fn history(&self) -> &[DrawRecord] {
        &self.data.history
    }
}

impl<T: PhaseState> PoolManagement for Draw<T> {
    fn merge(&mut self, candidates: Vec<Participant>) -> usize {
        let admitted = self.data.pool.merge(candidates);
        let event = if admitted > 0 {
            log::info!(
                "{} participant(s) admitted during {} phase",
                admitted,
                T::PHASE
            );
            RaffleEvent::ParticipantsAdded(admitted)
        } else {
            RaffleEvent::NoNewParticipants
        };
        self.data.events.push_back(event);
        admitted
    }

    fn reset_pool(&mut self) {
        self.data.pool.reset_available();
        let available = self.data.pool.available_len();
        log::info!("Pool manually reset, {} available", available);
        self.data.events.push_back(RaffleEvent::PoolReset { available });
    }
}

impl Draw<Idle> {
    fn new(data: DrawData) -> Self {
        Self { data, state: Idle }
    }

    /// Pick a winner and lay out the reel without changing state.
    fn prepare(&mut self) -> DrawResult<(Arc<Participant>, Arc<ReelPlan>)> {
        let available = self.data.pool.available();
        if available.is_empty() {
            self.data.events.push_back(RaffleEvent::EmptyPool);
            return Err(DrawError::EmptyPool);
        }

        let idx = self.data.selector.pick(available.len())?;
        let winner = Arc::clone(&available[idx]);

        let draw_id = self.data.next_draw_id;
        let plan = ReelPlan::build(
            draw_id,
            available,
            &winner.id,
            &self.data.reel,
            &mut self.data.selector,
        )?;
        self.data.next_draw_id += 1;

        Ok((winner, Arc::new(plan)))
    }

    fn spin(mut self, winner: Arc<Participant>, plan: Arc<ReelPlan>) -> Draw<Spinning> {
        log::info!(
            "Draw #{} started: {} tokens, landing at {}",
            plan.draw_id,
            plan.len(),
            plan.target_index
        );
        self.data.events.push_back(RaffleEvent::WinnerDrawn {
            draw_id: plan.draw_id,
            display_name: winner.display_name.clone(),
        });
        Draw {
            data: self.data,
            state: Spinning {
                winner,
                plan,
                drawn_at: Utc::now(),
            },
        }
    }
}

impl Draw<Spinning> {
    fn complete(mut self) -> Draw<Ended> {
        let Spinning {
            winner,
            plan,
            drawn_at,
        } = self.state;
        log::info!("Draw #{} landed on {}", plan.draw_id, winner.id);
        self.data.events.push_back(RaffleEvent::WinnerRevealed {
            draw_id: plan.draw_id,
            full_name: winner.full_name(),
        });
        Draw {
            data: self.data,
            state: Ended {
                winner,
                draw_id: plan.draw_id,
                drawn_at,
            },
        }
    }
}

impl Draw<Ended> {
    /// Remove the winner from the pool, refilling it if that empties it.
    fn commit(mut self) -> (Draw<Idle>, Arc<Participant>) {
        let Ended {
            winner,
            draw_id,
            drawn_at,
        } = self.state;

        self.data.pool.remove_from_available(&winner.id);
        self.data.history.push(DrawRecord {
            draw_id,
            winner: winner.id.clone(),
            full_name: winner.full_name(),
            drawn_at,
        });

        let pool = &mut self.data.pool;
        if pool.available_len() == 0 && !pool.is_empty() {
            pool.reset_available();
            let registry = pool.registry_len();
            log::info!("Round complete, pool reset to {} participants", registry);
            self.data
                .events
                .push_back(RaffleEvent::RoundComplete { registry });
        }

        log::debug!(
            "Draw #{} committed, {} still available",
            draw_id,
            self.data.pool.available_len()
        );
        (Draw::new(self.data), winner)
    }
}

/// The raffle engine: one draw at a time, Idle → Spinning → Ended → Idle.
#[enum_dispatch(DrawStateManagement, PoolManagement)]
#[derive(Debug)]
pub enum RaffleState {
    Idle(Draw<Idle>),
    Spinning(Draw<Spinning>),
    Ended(Draw<Ended>),
}

impl Default for RaffleState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ReelConfig> for RaffleState {
    fn from(value: ReelConfig) -> Self {
        Self::Idle(Draw::new(value.into()))
    }
}

impl RaffleState {
    #[must_use]
    pub fn new() -> Self {
        Self::Idle(Draw::new(DrawData::default()))
    }

    /// Pick a winner and start spinning.
    ///
    /// # Errors
    ///
    /// * [`DrawError::DrawInProgress`] - not idle
    /// * [`DrawError::EmptyPool`] - nobody available
    ///
    /// The state is unchanged on error.
    pub fn start_draw(&mut self) -> DrawResult<Arc<ReelPlan>> {
        let Self::Idle(draw) = self else {
            self.data_mut()
                .events
                .push_back(RaffleEvent::DrawAlreadyInProgress);
            return Err(DrawError::DrawInProgress);
        };

        let (winner, plan) = draw.prepare()?;

        let state = std::mem::take(self);
        *self = match state {
            Self::Idle(draw) => Self::Spinning(draw.spin(winner, Arc::clone(&plan))),
            other => other,
        };
        Ok(plan)
    }

    /// Signal that the reel for `draw_id` finished animating.
    ///
    /// Signals for any other draw, or outside the spinning phase, are
    /// ignored.
    ///
    /// # Returns
    ///
    /// * `bool` - Whether the signal ended the current draw
    pub fn animation_complete(&mut self, draw_id: DrawId) -> bool {
        let matches = matches!(self, Self::Spinning(draw) if draw.state.plan.draw_id == draw_id);
        if !matches {
            log::debug!(
                "Ignoring completion signal for draw #{} in {} phase",
                draw_id,
                self.phase()
            );
            return false;
        }

        let state = std::mem::take(self);
        *self = match state {
            Self::Spinning(draw) => Self::Ended(draw.complete()),
            other => other,
        };
        true
    }

    /// Commit the revealed winner and return to idle.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::RoundNotEnded`] unless a winner is on display.
    pub fn next_round(&mut self) -> DrawResult<Arc<Participant>> {
        let state = std::mem::take(self);
        let (next, winner) = match state {
            Self::Ended(draw) => {
                let (idle, winner) = draw.commit();
                (Self::Idle(idle), Some(winner))
            }
            other => (other, None),
        };
        *self = next;
        winner.ok_or(DrawError::RoundNotEnded)
    }

    /// Id of the draw currently in flight or on display
    pub fn current_draw_id(&self) -> Option<DrawId> {
        match self {
            Self::Idle(_) => None,
            Self::Spinning(draw) => Some(draw.state.plan.draw_id),
            Self::Ended(draw) => Some(draw.state.draw_id),
        }
    }

    fn data_mut(&mut self) -> &mut DrawData {
        match self {
            Self::Idle(draw) => &mut draw.data,
            Self::Spinning(draw) => &mut draw.data,
            Self::Ended(draw) => &mut draw.data,
        }
    }
}
