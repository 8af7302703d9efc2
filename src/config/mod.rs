use std::env;
use std::time::Duration;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let engine = EngineConfig::from_env()?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            engine,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings consumed by the risk engine and its reasoning gateway.
///
/// Defaults: near-deterministic sampling, three retry attempts with a
/// two-second base delay, and a ninety-second per-call timeout.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api_key: String,
    pub base_url: String,
    pub model_name: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub escalation: EscalationThresholds,
    pub scoring: ScoringWeights,
}

impl EngineConfig {
    /// Build engine settings from the environment. A missing API key is
    /// the one fatal setup failure: it is surfaced here, before any
    /// analysis begins.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let mut config = Self::with_api_key(api_key);

        if let Ok(base_url) = env::var("CONTRACT_AI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = env::var("CONTRACT_AI_MODEL") {
            config.model_name = model;
        }
        if let Ok(raw) = env::var("CONTRACT_AI_TEMPERATURE") {
            config.temperature = raw
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    variable: "CONTRACT_AI_TEMPERATURE",
                    value: raw,
                })?;
        }
        if let Ok(raw) = env::var("CONTRACT_AI_MAX_TOKENS") {
            config.max_output_tokens =
                raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                    variable: "CONTRACT_AI_MAX_TOKENS",
                    value: raw,
                })?;
        }
        if let Ok(raw) = env::var("CONTRACT_AI_MAX_RETRIES") {
            config.max_retries = raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                variable: "CONTRACT_AI_MAX_RETRIES",
                value: raw,
            })?;
        }
        if let Ok(raw) = env::var("CONTRACT_AI_RETRY_DELAY_SECS") {
            let secs = raw.parse::<f64>().map_err(|_| ConfigError::InvalidNumber {
                variable: "CONTRACT_AI_RETRY_DELAY_SECS",
                value: raw,
            })?;
            config.retry_delay = Duration::from_secs_f64(secs);
        }

        Ok(config)
    }

    /// Engine settings with documented defaults and the supplied key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model_name: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_output_tokens: 3000,
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(90),
            escalation: EscalationThresholds::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

/// Thresholds at which accumulated Medium findings escalate to High.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationThresholds {
    pub escalation_count: usize,
    pub escalation_weight: f64,
}

impl Default for EscalationThresholds {
    fn default() -> Self {
        Self {
            escalation_count: 3,
            escalation_weight: 5.0,
        }
    }
}

/// Named weights backing the clause-level numeric score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub base_low: f64,
    pub base_medium: f64,
    pub base_high: f64,
    pub low_confidence_threshold: i64,
    pub low_confidence_bonus: f64,
    pub rule_hit_weight: f64,
    pub rule_hit_cap: f64,
    pub concern_weight: f64,
    pub concern_cap: f64,
    pub missing_protection_weight: f64,
    pub missing_protection_cap: f64,
    pub max_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_low: 25.0,
            base_medium: 50.0,
            base_high: 80.0,
            low_confidence_threshold: 70,
            low_confidence_bonus: 5.0,
            rule_hit_weight: 3.0,
            rule_hit_cap: 15.0,
            concern_weight: 2.0,
            concern_cap: 10.0,
            missing_protection_weight: 3.0,
            missing_protection_cap: 10.0,
            max_score: 100.0,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY must be set to reach the reasoning service")]
    MissingApiKey,
    #[error("{variable} must be a valid number, found '{value}'")]
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("CONTRACT_AI_BASE_URL");
        env::remove_var("CONTRACT_AI_MODEL");
        env::remove_var("CONTRACT_AI_TEMPERATURE");
        env::remove_var("CONTRACT_AI_MAX_TOKENS");
        env::remove_var("CONTRACT_AI_MAX_RETRIES");
        env::remove_var("CONTRACT_AI_RETRY_DELAY_SECS");
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        assert!(matches!(
            EngineConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::with_api_key("test-key");
        assert_eq!(config.model_name, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_output_tokens, 3000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert_eq!(config.escalation.escalation_count, 3);
        assert_eq!(config.escalation.escalation_weight, 5.0);
    }

    #[test]
    fn env_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OPENAI_API_KEY", "test-key");
        env::set_var("CONTRACT_AI_MODEL", "gpt-4o");
        env::set_var("CONTRACT_AI_MAX_RETRIES", "5");
        env::set_var("CONTRACT_AI_BASE_URL", "https://proxy.internal/v1/");

        let config = EngineConfig::from_env().expect("config loads");
        assert_eq!(config.model_name, "gpt-4o");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_url, "https://proxy.internal/v1");
        reset_env();
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OPENAI_API_KEY", "test-key");
        env::set_var("CONTRACT_AI_TEMPERATURE", "warm");

        assert!(matches!(
            EngineConfig::from_env(),
            Err(ConfigError::InvalidNumber {
                variable: "CONTRACT_AI_TEMPERATURE",
                ..
            })
        ));
        reset_env();
    }
}
