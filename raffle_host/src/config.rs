//! Host configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use raffle::{
    ReelConfig,
    reel::MAX_REPETITIONS,
    session::SessionConfig,
};
use std::{path::PathBuf, str::FromStr, time::Duration};

/// Values given on the command line; these win over the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub csv: Option<PathBuf>,
    pub spin_ms: Option<u64>,
}

/// Complete host configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Session name, reel geometry and channel sizes
    pub session: SessionConfig,
    /// Participant file imported at startup
    pub csv_path: Option<PathBuf>,
}

impl HostConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(overrides: CliOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();
        let reel_defaults = ReelConfig::default();

        let spin_ms = match overrides.spin_ms {
            Some(ms) => ms,
            None => parse_env_or(
                &lookup,
                "SPIN_DURATION_MS",
                reel_defaults.spin_duration.as_millis() as u64,
            )?,
        };

        let reel = ReelConfig {
            repetitions: parse_env_or(&lookup, "REEL_REPETITIONS", reel_defaults.repetitions)?,
            row_height: parse_env_or(&lookup, "REEL_ROW_HEIGHT", reel_defaults.row_height)?,
            viewport_rows: parse_env_or(
                &lookup,
                "REEL_VIEWPORT_ROWS",
                reel_defaults.viewport_rows,
            )?,
            spin_duration: Duration::from_millis(spin_ms),
        };

        let session = SessionConfig {
            name: lookup("RAFFLE_NAME").unwrap_or(defaults.name),
            reel,
            inbox_capacity: parse_env_or(
                &lookup,
                "SESSION_INBOX_CAPACITY",
                defaults.inbox_capacity,
            )?,
            subscriber_capacity: defaults.subscriber_capacity,
        };

        let csv_path = overrides
            .csv
            .or_else(|| lookup("RAFFLE_CSV").map(PathBuf::from));

        Ok(HostConfig { session, csv_path })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reel = &self.session.reel;

        if reel.repetitions == 0 || reel.repetitions > MAX_REPETITIONS {
            return Err(ConfigError::Invalid {
                var: "REEL_REPETITIONS".to_string(),
                reason: format!("Must be between 1 and {MAX_REPETITIONS}"),
            });
        }

        if reel.row_height == 0 {
            return Err(ConfigError::Invalid {
                var: "REEL_ROW_HEIGHT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if reel.viewport_rows % 2 == 0 {
            return Err(ConfigError::Invalid {
                var: "REEL_VIEWPORT_ROWS".to_string(),
                reason: "Must be odd so the winner row sits in the middle".to_string(),
            });
        }

        if reel.spin_duration.is_zero() {
            return Err(ConfigError::Invalid {
                var: "SPIN_DURATION_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.session.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        self.session
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "RAFFLE_NAME".to_string(),
                reason,
            })
    }

    pub fn to_session_config(&self) -> SessionConfig {
        self.session.clone()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback when unset
fn parse_env_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse '{raw}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], overrides: CliOverrides) -> Result<HostConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(overrides, |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[], CliOverrides::default()).unwrap();
        assert_eq!(config.session, SessionConfig::default());
        assert!(config.csv_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_values_applied() {
        let config = load(
            &[
                ("RAFFLE_NAME", "Spring Gala"),
                ("REEL_REPETITIONS", "6"),
                ("REEL_VIEWPORT_ROWS", "5"),
                ("SPIN_DURATION_MS", "2500"),
                ("RAFFLE_CSV", "guests.csv"),
            ],
            CliOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.session.name, "Spring Gala");
        assert_eq!(config.session.reel.repetitions, 6);
        assert_eq!(config.session.reel.viewport_rows, 5);
        assert_eq!(config.session.reel.spin_duration, Duration::from_millis(2500));
        assert_eq!(config.csv_path, Some(PathBuf::from("guests.csv")));
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = load(
            &[("SPIN_DURATION_MS", "2500"), ("RAFFLE_CSV", "guests.csv")],
            CliOverrides {
                csv: Some(PathBuf::from("vip.csv")),
                spin_ms: Some(100),
            },
        )
        .unwrap();

        assert_eq!(config.session.reel.spin_duration, Duration::from_millis(100));
        assert_eq!(config.csv_path, Some(PathBuf::from("vip.csv")));
    }

    #[test]
    fn test_unparsable_value_rejected() {
        let err = load(&[("REEL_ROW_HEIGHT", "tall")], CliOverrides::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("REEL_ROW_HEIGHT"));
        assert!(msg.contains("tall"));
    }

    #[test]
    fn test_validation_even_viewport() {
        let config = load(&[("REEL_VIEWPORT_ROWS", "4")], CliOverrides::default()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "REEL_VIEWPORT_ROWS"));
    }

    #[test]
    fn test_validation_repetitions_capped() {
        let huge = (usize::MAX / 2).to_string();
        let config =
            load(&[("REEL_REPETITIONS", huge.as_str())], CliOverrides::default()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "REEL_REPETITIONS"));
    }

    #[test]
    fn test_validation_zero_spin() {
        let config = load(
            &[],
            CliOverrides {
                spin_ms: Some(0),
                ..CliOverrides::default()
            },
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_blank_name() {
        let config = load(&[("RAFFLE_NAME", "   ")], CliOverrides::default()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "RAFFLE_NAME"));
    }
}
