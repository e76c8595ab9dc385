use serde::{Deserialize, Serialize};
use std::{net::IpAddr, path::{Path, PathBuf}};

use crate::input::InputPrecedence;

pub const ENV_PREFIX: &str = "AREA_PRICE";
pub const DEFAULT_BANNER_URL: &str = "https://wallpapercave.com/wp/wp10389741.jpg";

/// Routes owned by the application; the metrics endpoint must not shadow them
pub const APP_ROUTES: &[&str] = &[
    "/",
    "/predict",
    "/health",
    "/ready",
    "/api/v1/cities",
    "/api/v1/predict",
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub banner: BannerConfig,
    pub input: InputConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path of the regression artifact, relative to the working directory
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("area_price_model.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BannerConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_seconds: u64,
    pub caption: String,
    /// Largest accepted image body
    pub max_size_bytes: usize,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_BANNER_URL.to_string(),
            timeout_seconds: 30,
            caption: "Property Price Prediction".to_string(),
            max_size_bytes: crate::banner::MAX_SIZE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub precedence: InputPrecedence,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

/// Load configuration from `path` (optional) and `AREA_PRICE__*` environment variables
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    build_config(
        path,
        config::Environment::with_prefix(ENV_PREFIX).separator("__"),
    )
}

fn build_config(path: &Path, env: config::Environment) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    match cfg.server.log_format.as_str() {
        "json" | "pretty" => {}
        other => anyhow::bail!("Invalid log format '{}' (expected 'json' or 'pretty')", other),
    }

    if cfg.model.path.as_os_str().is_empty() {
        anyhow::bail!("Model path cannot be empty");
    }

    if cfg.banner.enabled
        && !cfg.banner.url.starts_with("http://")
        && !cfg.banner.url.starts_with("https://")
    {
        anyhow::bail!("Banner URL must be HTTP(S): {}", cfg.banner.url);
    }

    if cfg.banner.enabled && cfg.banner.max_size_bytes == 0 {
        anyhow::bail!("Banner max_size_bytes must be non-zero");
    }

    if cfg.metrics.enabled {
        if !cfg.metrics.endpoint.starts_with('/') {
            anyhow::bail!("Metrics endpoint must start with '/': {}", cfg.metrics.endpoint);
        }
        if APP_ROUTES.contains(&cfg.metrics.endpoint.as_str()) {
            anyhow::bail!(
                "Metrics endpoint '{}' collides with an application route",
                cfg.metrics.endpoint
            );
        }
    }

    Ok(())
}
