use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::infra::offers::{DEFAULT_BASE_URL, DEFAULT_DELAY, DEFAULT_FAILURE_RATE};

const BASE_URL_VAR: &str = "LOAN_RANKING_BASE_URL";
const DELAY_VAR: &str = "LOAN_RANKING_DELAY_MS";
const FAILURE_RATE_VAR: &str = "LOAN_RANKING_FAILURE_RATE";
const EVENT_LOG_VAR: &str = "LOAN_RANKING_EVENT_LOG";
const LOG_LEVEL_VAR: &str = "LOAN_RANKING_LOG_LEVEL";
const ECHO_VAR: &str = "LOAN_RANKING_ANALYTICS_ECHO";

/// Top-level configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub offers: OfferSourceConfig,
    pub analytics: AnalyticsConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = read(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let simulated_delay = match read(DELAY_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidDelay(raw))?,
            None => DEFAULT_DELAY,
        };

        let failure_rate = match read(FAILURE_RATE_VAR) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => rate,
                _ => return Err(ConfigError::InvalidFailureRate(raw)),
            },
            None => DEFAULT_FAILURE_RATE,
        };

        let echo = match read(ECHO_VAR) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: ECHO_VAR,
                value: raw,
            })?,
            None => cfg!(debug_assertions),
        };

        Ok(Self {
            offers: OfferSourceConfig {
                base_url,
                simulated_delay,
                failure_rate,
            },
            analytics: AnalyticsConfig {
                log_path: read(EVENT_LOG_VAR).map(PathBuf::from),
                echo,
            },
            telemetry: TelemetryConfig {
                log_level: read(LOG_LEVEL_VAR).unwrap_or_else(|| "info".to_string()),
            },
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            offers: OfferSourceConfig::default(),
            analytics: AnalyticsConfig {
                log_path: None,
                echo: cfg!(debug_assertions),
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

/// Where offers come from and how the simulated network behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferSourceConfig {
    pub base_url: String,
    pub simulated_delay: Duration,
    pub failure_rate: f64,
}

impl Default for OfferSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            simulated_delay: DEFAULT_DELAY,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsConfig {
    /// Overrides the platform data directory location.
    pub log_path: Option<PathBuf>,
    pub echo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LOAN_RANKING_DELAY_MS must be a whole number of milliseconds, got '{0}'")]
    InvalidDelay(String),
    #[error("LOAN_RANKING_FAILURE_RATE must be a number between 0 and 1, got '{0}'")]
    InvalidFailureRate(String),
    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.offers.simulated_delay, Duration::from_millis(500));
        assert_eq!(config.offers.failure_rate, 0.1);
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            (BASE_URL_VAR, "http://127.0.0.1:8080/"),
            (DELAY_VAR, "0"),
            (FAILURE_RATE_VAR, "1"),
            (EVENT_LOG_VAR, "/tmp/events.json"),
            (LOG_LEVEL_VAR, "debug"),
            (ECHO_VAR, "off"),
        ])
        .unwrap();

        assert_eq!(config.offers.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.offers.simulated_delay, Duration::ZERO);
        assert_eq!(config.offers.failure_rate, 1.0);
        assert_eq!(
            config.analytics.log_path,
            Some(PathBuf::from("/tmp/events.json"))
        );
        assert!(!config.analytics.echo);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[(BASE_URL_VAR, "   "), (DELAY_VAR, "")]).unwrap();
        assert_eq!(config.offers.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.offers.simulated_delay, DEFAULT_DELAY);
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        assert_eq!(
            load(&[(FAILURE_RATE_VAR, "1.5")]),
            Err(ConfigError::InvalidFailureRate("1.5".to_string()))
        );
        assert!(load(&[(FAILURE_RATE_VAR, "often")]).is_err());
    }

    #[test]
    fn rejects_malformed_delay_and_flag() {
        assert_eq!(
            load(&[(DELAY_VAR, "-5")]),
            Err(ConfigError::InvalidDelay("-5".to_string()))
        );
        assert!(matches!(
            load(&[(ECHO_VAR, "maybe")]),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
