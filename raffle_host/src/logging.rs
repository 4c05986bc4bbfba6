//! Structured logging configuration.
//!
//! Library records emitted through `log` are bridged into the same
//! subscriber, so engine transitions and host output share one stream.

use raffle::RaffleEvent;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the RUST_LOG env var and default to `info`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log a session notification with structured fields
///
/// Rejections and source failures are warnings; everything else is info.
pub fn log_draw_event(event: &RaffleEvent) {
    match event {
        RaffleEvent::WinnerDrawn {
            draw_id,
            display_name,
        } => {
            tracing::info!(draw_id = draw_id, winner = %display_name, "DRAW: {}", event);
        }
        RaffleEvent::WinnerRevealed { draw_id, full_name } => {
            tracing::info!(draw_id = draw_id, winner = %full_name, "DRAW: {}", event);
        }
        RaffleEvent::RoundComplete { registry } => {
            tracing::info!(registry = registry, "DRAW: {}", event);
        }
        RaffleEvent::PoolReset { available } => {
            tracing::info!(available = available, "POOL: {}", event);
        }
        RaffleEvent::ParticipantsAdded(count) => {
            tracing::info!(admitted = count, "POOL: {}", event);
        }
        RaffleEvent::NoNewParticipants => tracing::info!("POOL: {}", event),
        RaffleEvent::EmptyPool | RaffleEvent::DrawAlreadyInProgress => {
            tracing::warn!("DRAW: {}", event);
        }
        RaffleEvent::SourceUnavailable(reason) => {
            tracing::warn!(reason = %reason, "SOURCE: {}", event);
        }
        RaffleEvent::SourceRestored => tracing::info!("SOURCE: {}", event),
    }
}

/// Log how long a reel animation actually took against its target
pub fn log_spin_timing(draw_id: u64, target_ms: u64, elapsed_ms: u64) {
    if elapsed_ms > target_ms + target_ms / 4 {
        tracing::warn!(
            draw_id = draw_id,
            target_ms = target_ms,
            elapsed_ms = elapsed_ms,
            "Reel animation overran"
        );
    } else {
        tracing::debug!(
            draw_id = draw_id,
            target_ms = target_ms,
            elapsed_ms = elapsed_ms,
            "Reel animation finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_draw_event() {
        // Just ensure it doesn't panic
        log_draw_event(&RaffleEvent::WinnerDrawn {
            draw_id: 1,
            display_name: "Ann L.".to_string(),
        });
        log_draw_event(&RaffleEvent::SourceUnavailable("timeout".to_string()));
        log_draw_event(&RaffleEvent::EmptyPool);
    }

    #[test]
    fn test_log_spin_timing() {
        log_spin_timing(1, 8000, 8100);
        log_spin_timing(2, 8000, 12000);
    }
}
