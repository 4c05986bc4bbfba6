//! Renderer seam for reel animations.

use async_trait::async_trait;
use std::sync::Arc;

use super::{actor::SessionHandle, messages::SessionResult};
use crate::{pool::Participant, reel::ReelPlan};

/// Animates a reel plan. `render` returns once the reel has stopped on
/// `plan.target_offset`.
#[async_trait]
pub trait ReelRenderer: Send + Sync {
    async fn render(&self, plan: &ReelPlan);
}

/// Renderer that stops immediately, for headless sessions and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantRenderer;

#[async_trait]
impl ReelRenderer for InstantRenderer {
    async fn render(&self, _plan: &ReelPlan) {}
}

/// Run one draw end to end: start, render, then signal completion.
///
/// # Returns
///
/// * `Arc<Participant>` - The revealed winner, still pending `next_round`
pub async fn draw_with<R>(handle: &SessionHandle, renderer: &R) -> SessionResult<Arc<Participant>>
where
    R: ReelRenderer + ?Sized,
{
    let plan = handle.start_draw().await?;
    renderer.render(&plan).await;

    if !handle.animation_complete(plan.draw_id).await? {
        log::warn!("Completion for draw #{} was not accepted", plan.draw_id);
    }

    Ok(Arc::clone(plan.winner()))
}
