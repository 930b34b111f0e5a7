//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::calculate::DisciplineSet;
use crate::ingest::{Normalizer, COUNTRY_ALIASES};
use crate::storage::DatasetFormat;
use crate::store::GameOrder;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Dataset location and ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    /// Inferred from the file extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DatasetFormat>,

    #[serde(default)]
    pub game_order: GameOrder,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("./data/medals.csv")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            format: None,
            game_order: GameOrder::default(),
        }
    }
}

/// Analytics parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Disciplines shown on the top-disciplines map
    #[serde(default)]
    pub top_disciplines: DisciplineSet,
}

/// Dataset normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Alias → canonical country name. Replaces the built-in table when set.
    #[serde(default = "default_country_aliases")]
    pub country_aliases: BTreeMap<String, String>,
}

fn default_country_aliases() -> BTreeMap<String, String> {
    COUNTRY_ALIASES
        .iter()
        .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
        .collect()
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            country_aliases: default_country_aliases(),
        }
    }
}

impl NormalizationConfig {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.country_aliases.clone())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub normalization: NormalizationConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dataset: DatasetConfig::default(),
            analytics: AnalyticsConfig::default(),
            normalization: NormalizationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.analytics.top_disciplines.is_empty() {
            return Err(ConfigError::ValidationError(
                "analytics.top_disciplines must name at least one discipline".to_string(),
            ));
        }

        for (alias, canonical) in &self.normalization.country_aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Country alias entries must be non-empty: {alias:?} = {canonical:?}"
                )));
            }
            if self.normalization.country_aliases.contains_key(canonical) {
                return Err(ConfigError::ValidationError(format!(
                    "Country alias target {canonical:?} is itself an alias"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.dataset.path, PathBuf::from("./data/medals.csv"));
        assert_eq!(config.dataset.format, None);
        assert_eq!(config.dataset.game_order, GameOrder::Insertion);
        assert_eq!(config.analytics.top_disciplines, DisciplineSet::default());
        assert_eq!(config.normalization.country_aliases.len(), 4);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_disciplines() {
        let mut config = AppConfig::default();
        config.analytics.top_disciplines = DisciplineSet::new(Vec::<String>::new());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_chained_alias() {
        let mut config = AppConfig::default();
        config
            .normalization
            .country_aliases
            .insert("USSR".to_string(), "Soviet Union".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
log_level = "debug"

[dataset]
path = "medals.jsonl"
format = "jsonl"
game_order = "slug_year"

[analytics]
top_disciplines = ["Judo", "Sailing"]

[normalization.country_aliases]
"Great Britain" = "United Kingdom"
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.dataset.format, Some(DatasetFormat::Jsonl));
        assert_eq!(config.dataset.game_order, GameOrder::SlugYear);
        assert_eq!(config.analytics.top_disciplines.len(), 2);
        assert_eq!(config.server.port, 8080);

        let normalizer = config.normalization.normalizer();
        assert_eq!(normalizer.canonical_country("Great Britain"), "United Kingdom");
        assert_eq!(normalizer.canonical_country("ROC"), "ROC");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.dataset.path, parsed.dataset.path);
        assert_eq!(
            config.normalization.country_aliases,
            parsed.normalization.country_aliases
        );
    }
}
