//! Configuration management for RINEX Lister
//!
//! Settings are read from the first TOML file found among the standard
//! locations. Every section and key is optional; command line flags take
//! precedence over anything loaded here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::availability::HealthThresholds;
use crate::app::defines::{DataCenter, DataRate, DataType, RinexVersion};
use crate::app::{ClientConfig, ListingOptions};
use crate::constants::{availability, config as locations, http, limits};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Default search filters
    pub listing: ListingConfigToml,
    /// Data availability settings
    pub availability: AvailabilityConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// CSS selector of file anchors on archive index pages
    pub archive_selector: String,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            archive_selector: http::ARCHIVE_ITEM_SELECTOR.to_string(),
        }
    }
}

/// TOML-friendly default search filters
///
/// Values use the same spelling as the command line: versions as `"3"`,
/// rates as `"daily"`, types as `"mixed-obs"`, centers as `"CDDIS"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfigToml {
    pub data_centers: Vec<String>,
    pub rinex_versions: Vec<String>,
    pub data_rates: Vec<String>,
    pub data_types: Vec<String>,
    pub hours: Vec<u8>,
    /// Directories listed concurrently (None = one per data center)
    pub batch_size: Option<usize>,
}

/// TOML-friendly availability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfigToml {
    /// Days into the past to search
    pub lookback_days: u32,
    /// Age in days after which a site is stale
    pub stale_after_days: u32,
    /// Age in days after which a site is unhealthy
    pub unhealthy_after_days: u32,
    /// Site registry file used when `--sites` is not given
    pub sites_file: Option<PathBuf>,
}

impl Default for AvailabilityConfigToml {
    fn default() -> Self {
        Self {
            lookback_days: availability::DEFAULT_LOOKBACK_DAYS,
            stale_after_days: availability::STALE_AFTER_DAYS,
            unhealthy_after_days: availability::UNHEALTHY_AFTER_DAYS,
            sites_file: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config_file_override`, or from the first
    /// standard location that exists, or fall back to defaults
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(locations::LOCAL_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }
        #[cfg(unix)]
        search_paths.push(PathBuf::from(locations::SYSTEM_FILE));

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(locations::APP_DIR).join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            rate_limit_rps: self.rate_limit_rps,
            archive_selector: self.archive_selector.clone(),
        }
    }
}

impl ListingConfigToml {
    /// Convert to listing options carrying these defaults
    pub fn to_listing_options(&self) -> ConfigResult<ListingOptions> {
        let mut options = ListingOptions::new()
            .with_data_centers(parse_all::<DataCenter>(&self.data_centers)?)
            .with_rinex_versions(parse_all::<RinexVersion>(&self.rinex_versions)?)
            .with_data_rates(parse_all::<DataRate>(&self.data_rates)?)
            .with_data_types(parse_all::<DataType>(&self.data_types)?)
            .with_hours(self.hours.iter().copied());
        options.batch_size = self.batch_size;
        Ok(options)
    }
}

impl AvailabilityConfigToml {
    pub fn thresholds(&self) -> HealthThresholds {
        HealthThresholds {
            stale_after_days: self.stale_after_days,
            unhealthy_after_days: self.unhealthy_after_days,
        }
    }
}

fn parse_all<T>(values: &[String]) -> ConfigResult<Vec<T>>
where
    T: std::str::FromStr<Err = ConfigError>,
{
    values.iter().map(|value| value.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.client.rate_limit_rps, limits::DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(config.availability.lookback_days, 60);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.client.to_runtime_config(), ClientConfig::default());
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let test_config = r#"
[client]
request_timeout_secs = 20
rate_limit_rps = 2

[listing]
data_centers = ["IGN", "kasi"]
rinex_versions = ["2", "3"]
data_rates = ["daily"]
data_types = ["mixed-obs", "d"]
hours = [0, 12]
batch_size = 4

[availability]
lookback_days = 30
stale_after_days = 5

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();

        let client = config.client.to_runtime_config();
        assert_eq!(client.request_timeout, Duration::from_secs(20));
        assert_eq!(client.rate_limit_rps, 2);
        assert_eq!(client.connect_timeout, http::CONNECT_TIMEOUT);

        let options = config.listing.to_listing_options().unwrap();
        assert_eq!(options.data_centers.len(), 2);
        assert!(options.data_centers.contains(&DataCenter::Kasi));
        assert!(options.rinex_versions.contains(&RinexVersion::V2));
        assert!(options.data_types.contains(&DataType::HatanakaObs));
        assert_eq!(options.batch_size, Some(4));

        let thresholds = config.availability.thresholds();
        assert_eq!(thresholds.stale_after_days, 5);
        assert_eq!(thresholds.unhealthy_after_days, 30);
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[client\nrate_limit_rps = ")
            .await
            .unwrap();

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_unknown_filter_value() {
        let listing = ListingConfigToml {
            data_rates: vec!["weekly".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            listing.to_listing_options(),
            Err(ConfigError::InvalidValue { field: "data rate", .. })
        ));
    }
}
