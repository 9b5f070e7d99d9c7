use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "hotel.toml",
    "config/hotel.toml",
    "crates/config/hotel.toml",
    "../hotel.toml",
    "../config/hotel.toml",
    "../crates/config/hotel.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub operations: OperationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://hotel.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Tunables for the domain services.
///
/// ```
/// use hotel_config::OperationsConfig;
///
/// let operations = OperationsConfig::default();
/// assert_eq!(operations.currency, "USD");
/// assert_eq!(operations.clamp_limit(Some(10_000)), operations.max_page_size);
/// assert_eq!(operations.clamp_limit(None), operations.default_page_size);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsConfig {
    #[serde(default = "OperationsConfig::default_currency")]
    pub currency: String,
    #[serde(default = "OperationsConfig::default_page_size")]
    pub default_page_size: i64,
    #[serde(default = "OperationsConfig::default_max_page_size")]
    pub max_page_size: i64,
    /// When set, items at or below this quantity count as low stock regardless
    /// of their own reorder level.
    #[serde(default)]
    pub low_stock_threshold_override: Option<i64>,
}

impl OperationsConfig {
    fn default_currency() -> String {
        "USD".to_string()
    }

    const fn default_page_size() -> i64 {
        50
    }

    const fn default_max_page_size() -> i64 {
        200
    }

    /// Resolve a requested page size against the configured bounds.
    pub fn clamp_limit(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(limit) if limit > 0 => limit.min(self.max_page_size),
            _ => self.default_page_size,
        }
    }
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            default_page_size: Self::default_page_size(),
            max_page_size: Self::default_max_page_size(),
            low_stock_threshold_override: None,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use hotel_config::load;
///
/// std::env::remove_var("HOTEL_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("operations.currency", defaults.operations.currency.clone())?
        .set_default(
            "operations.default_page_size",
            defaults.operations.default_page_size,
        )?
        .set_default("operations.max_page_size", defaults.operations.max_page_size)?;

    let environment_overrides = config::Environment::with_prefix("HOTEL").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("HOTEL_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via HOTEL_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.operations.max_page_size < 1 {
        config.operations.max_page_size = OperationsConfig::default_max_page_size();
    }
    if config.operations.default_page_size < 1
        || config.operations.default_page_size > config.operations.max_page_size
    {
        config.operations.default_page_size = config
            .operations
            .max_page_size
            .min(OperationsConfig::default_page_size());
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}
