use serde::Deserialize;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct HelloConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub container: ContainerConfig,
}

/// Identity reported by `/api/hello`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerConfig {
    /// Container hostname as set by the runtime.
    pub hostname: String,
    pub runtime: String,
}

impl HelloConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: get_env("SERVICE_NAME", Some("hello-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: std::env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            container: ContainerConfig {
                hostname: get_env("HOSTNAME", Some("unknown"))?,
                runtime: get_env("CONTAINER_RUNTIME", Some("Podman"))?,
            },
        })
    }
}
