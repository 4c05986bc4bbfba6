//! Terminal reel animation.

use async_trait::async_trait;
use raffle::{ReelPlan, session::ReelRenderer};
use std::{
    io::{self, Write},
    time::Duration,
};
use tokio::time::{Instant, sleep};

use crate::logging::log_spin_timing;

/// Delay between redrawn frames
const FRAME_INTERVAL: Duration = Duration::from_millis(40);

/// Width of one rendered reel row
const ROW_WIDTH: usize = 24;

/// Renders the reel as a decelerating ticker on stdout
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Cubic ease-out over `t` in `[0, 1]`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Reel row centered in the viewport after `elapsed` of the animation
pub fn row_at(plan: &ReelPlan, elapsed: Duration) -> usize {
    let total = plan.spin_duration.as_secs_f64();
    let progress = if total > 0.0 {
        ease_out_cubic(elapsed.as_secs_f64() / total)
    } else {
        1.0
    };
    (progress * plan.target_index as f64).round() as usize
}

fn frame(plan: &ReelPlan, center: usize) -> String {
    plan.visible_around(center)
        .iter()
        .map(|p| {
            let name: String = p.display_name.chars().take(ROW_WIDTH).collect();
            format!("{name:^ROW_WIDTH$}")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[async_trait]
impl ReelRenderer for TerminalRenderer {
    async fn render(&self, plan: &ReelPlan) {
        let started = Instant::now();
        let mut stdout = io::stdout();

        loop {
            let elapsed = started.elapsed();
            let center = row_at(plan, elapsed);
            let _ = write!(stdout, "\r[ {} ]", frame(plan, center));
            let _ = stdout.flush();

            if elapsed >= plan.spin_duration {
                break;
            }
            sleep(FRAME_INTERVAL.min(plan.spin_duration - elapsed)).await;
        }

        let _ = writeln!(stdout);
        log_spin_timing(
            plan.draw_id,
            plan.spin_duration.as_millis() as u64,
            started.elapsed().as_millis() as u64,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raffle::pool::{Origin, Participant};
    use std::sync::Arc;

    fn plan(spin_ms: u64) -> ReelPlan {
        let base: Vec<_> = ["p1", "p2", "p3"]
            .iter()
            .map(|id| Arc::new(Participant::new(*id, id, "Lee", Origin::Registration)))
            .collect();
        let winner = base[1].id.clone();
        let config = raffle::ReelConfig {
            spin_duration: Duration::from_millis(spin_ms),
            ..raffle::ReelConfig::default()
        };
        ReelPlan::from_base(1, base, &winner, &config).unwrap()
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_ease_out_cubic_monotonic() {
        let samples: Vec<f64> = (0..=20).map(|i| ease_out_cubic(i as f64 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_row_at_ends_on_target() {
        let plan = plan(1000);
        assert_eq!(row_at(&plan, Duration::ZERO), 0);
        assert_eq!(row_at(&plan, Duration::from_millis(1000)), plan.target_index);
        assert_eq!(row_at(&plan, Duration::from_secs(5)), plan.target_index);
    }

    #[test]
    fn test_frame_centers_winner() {
        let plan = plan(1000);
        let rendered = frame(&plan, plan.target_index);
        let rows: Vec<&str> = rendered.split(" | ").collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].trim(), plan.winner().display_name);
    }

    #[tokio::test]
    async fn test_render_completes() {
        let plan = plan(120);
        TerminalRenderer::new().render(&plan).await;
    }
}
