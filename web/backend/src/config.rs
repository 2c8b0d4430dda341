use lyricbridge_core::{CacheNamespace, PipelineConfig, RetryPolicy};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value '{value}'")]
    Invalid { name: String, value: String },
}

/// Runtime settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub genius_token: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub cache_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub spotify_market: String,
    pub pipeline: PipelineConfig,
    pub ttl_overrides: Vec<(CacheNamespace, Duration)>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => parse_var("BIND_ADDR", &value)?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let timeout_secs = match lookup("API_TIMEOUT_SECS") {
            Some(value) => parse_var("API_TIMEOUT_SECS", &value)?,
            None => 10,
        };
        let defaults = RetryPolicy::default();
        let retry = RetryPolicy::new(
            defaults.max_attempts,
            defaults.backoff_unit,
            Duration::from_secs(timeout_secs),
        );

        let mut ttl_overrides = Vec::new();
        for namespace in CacheNamespace::ALL {
            let name = format!("CACHE_TTL_{}_DAYS", namespace.as_str().replace('-', "_").to_uppercase());
            if let Some(value) = lookup(&name) {
                let days: u64 = parse_var(&name, &value)?;
                ttl_overrides.push((namespace, Duration::from_secs(days * SECONDS_PER_DAY)));
            }
        }

        Ok(Self {
            genius_token: required("GENIUS_API_TOKEN")?,
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            cache_dir: lookup("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("cache")),
            bind_addr,
            spotify_market: lookup("SPOTIFY_MARKET").unwrap_or_else(|| "BR".to_string()),
            pipeline: PipelineConfig {
                retry,
                ..PipelineConfig::default()
            },
            ttl_overrides,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
    })
}
