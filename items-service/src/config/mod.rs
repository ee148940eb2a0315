use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_parsed};
use service_core::error::AppError;
use service_core::retry::RetryConfig;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub init: InitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
}

/// Startup schema initialization policy.
#[derive(Debug, Clone, Deserialize)]
pub struct InitConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay_ms: 2000,
        }
    }
}

impl InitConfig {
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::fixed(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

impl ItemsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix
        let common = core_config::Config::load()?;
        let defaults = InitConfig::default();

        Ok(Self {
            common,
            service_name: get_env("SERVICE_NAME", Some("items-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: std::env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            database: DatabaseConfig {
                url: Secret::new(get_env("DATABASE_URL", None)?),
            },
            init: InitConfig {
                max_attempts: get_env_parsed("INIT_MAX_ATTEMPTS", defaults.max_attempts)?,
                retry_delay_ms: get_env_parsed("INIT_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            },
        })
    }
}
