//! Session configuration models.

use serde::{Deserialize, Serialize};

use crate::reel::ReelConfig;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Raffle name shown in logs and snapshots
    pub name: String,

    /// Reel layout and timing
    pub reel: ReelConfig,

    /// Capacity of the actor's message inbox (default: 100)
    pub inbox_capacity: usize,

    /// Capacity of each subscriber's notification channel (default: 32)
    pub subscriber_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: "Live Raffle".to_string(),
            reel: ReelConfig::default(),
            inbox_capacity: 100,
            subscriber_capacity: 32,
        }
    }
}

impl SessionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Session name must not be empty".to_string());
        }

        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be greater than 0".to_string());
        }

        if self.subscriber_capacity == 0 {
            return Err("Subscriber capacity must be greater than 0".to_string());
        }

        self.reel.validate()
    }
}
