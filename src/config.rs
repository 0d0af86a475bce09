use crate::domain::payment::Environment;
use crate::error::{ConnectorError, Result};
use crate::transport::http_client::TransportSettings;
use crate::transport::retry::RetryPolicy;
use std::collections::HashMap;

pub const SCHEME: &str = "tsi.scheme";
pub const HOST: &str = "tsi.host";
pub const GO_PATH: &str = "tsi.go.path";
pub const STATUS_PATH: &str = "tsi.status.path";

pub const PARTNER_PROPERTIES: [&str; 4] = [SCHEME, HOST, GO_PATH, STATUS_PATH];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub transport: TransportSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = TransportSettings::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            transport: TransportSettings {
                connect_timeout_secs: env_parse("TSI_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
                acquire_timeout_secs: env_parse("TSI_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout_secs),
                socket_timeout_secs: env_parse("TSI_SOCKET_TIMEOUT_SECS", defaults.socket_timeout_secs),
                max_connections: env_parse("TSI_MAX_CONNECTIONS", defaults.max_connections),
                retry: RetryPolicy {
                    max_attempts: env_parse("TSI_MAX_ATTEMPTS", defaults.retry.max_attempts),
                },
            },
        }
    }
}

/// Unparsable or out-of-range values fall back to `default`.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Partner endpoint properties, one value per (property, environment).
/// Unlike [`AppConfig`], nothing here has a default: a missing entry is an error.
#[derive(Clone, Debug, Default)]
pub struct PartnerConfig {
    values: HashMap<(String, Environment), String>,
}

impl PartnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, env: Environment, value: impl Into<String>) -> Self {
        self.values.insert((key.to_string(), env), value.into());
        self
    }

    /// Loads every known property for both environments, e.g. `TSI_GO_PATH_TEST`.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        for key in PARTNER_PROPERTIES {
            for env in [Environment::Test, Environment::Prod] {
                if let Ok(value) = std::env::var(env_var_name(key, env)) {
                    config.values.insert((key.to_string(), env), value);
                }
            }
        }
        config
    }

    pub fn get(&self, key: &str, env: Environment) -> Result<&str> {
        self.values
            .get(&(key.to_string(), env))
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ConnectorError::Configuration(format!("missing property {key} for environment {env}"))
            })
    }
}

pub fn env_var_name(key: &str, env: Environment) -> String {
    format!("{}_{}", key.replace('.', "_").to_uppercase(), env.as_str())
}
