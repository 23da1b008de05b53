use crate::activation::{LegacyFallbacks, SiteConfig};
use crate::classifier::{Threshold, ThresholdTable};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for Caption Assist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted word lists and site configurations
    pub store: StoreConfig,

    /// Output and logging settings
    pub output: OutputConfig,

    /// Default site configurations and legacy host fallbacks
    pub sites: SitesConfig,

    /// Special List thresholds
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding `wordCategories`, `timestampConfig` and `captionConfig`
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    /// Seeded as `captionConfig` on install
    pub caption: SiteConfig,

    /// Seeded as `timestampConfig` on install
    pub timestamp: SiteConfig,

    /// Used only when neither stored configuration has a URL
    pub legacy: LegacyFallbacks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Ascending duration ceilings with their tolerated occurrences
    pub thresholds: ThresholdTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default tracing filter level
    pub log_level: String,

    /// Report format for the CLI
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
    Html,
}

impl Config {
    /// Load configuration from file or environment
    pub fn load() -> Result<Self> {
        let config_paths = ["caption-assist.toml", "config/caption-assist.toml"];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load a specific configuration file
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Cannot parse config file {}", path))?;
        tracing::info!("📄 Loaded configuration from: {}", path);
        Ok(config)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(store) = std::env::var("CAPTION_ASSIST_STORE") {
            config.store.path = PathBuf::from(store);
        }

        if let Ok(log_level) = std::env::var("CAPTION_ASSIST_LOG_LEVEL") {
            config.output.log_level = log_level;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.classifier.thresholds.is_valid() {
            return Err(anyhow!(
                "classifier thresholds must be non-empty with strictly increasing ceilings"
            ));
        }

        for (name, site) in [("caption", &self.sites.caption), ("timestamp", &self.sites.timestamp)] {
            if site.has_url() && site.element.trim().is_empty() {
                return Err(anyhow!("sites.{} has a URL but no element selector", name));
            }
        }

        for (name, legacy) in [("caption", &self.sites.legacy.caption), ("timestamp", &self.sites.legacy.timestamp)] {
            if let Some(legacy) = legacy {
                if legacy.host_contains.trim().is_empty() || legacy.element.trim().is_empty() {
                    return Err(anyhow!("sites.legacy.{} needs both a host and an element", name));
                }
            }
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get configuration summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Caption Assist Configuration:\n\
            - Store: {}\n\
            - Caption site: {} ({})\n\
            - Timestamp site: {} ({})\n\
            - Threshold rows: {}\n\
            - Log level: {}",
            self.store.path.display(),
            self.sites.caption.url,
            self.sites.caption.element,
            self.sites.timestamp.url,
            self.sites.timestamp.element,
            self.classifier.thresholds.rows().len(),
            self.output.log_level
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                path: PathBuf::from("./caption-assist-store.json"),
            },
            output: OutputConfig {
                log_level: "info".to_string(),
                format: ReportFormat::Text,
            },
            sites: SitesConfig {
                caption: SiteConfig::default_caption(),
                timestamp: SiteConfig::default_timestamp(),
                legacy: LegacyFallbacks::default(),
            },
            classifier: ClassifierConfig {
                thresholds: ThresholdTable::default(),
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.config.store.path = path;
        self
    }

    pub fn with_caption_site(mut self, site: SiteConfig) -> Self {
        self.config.sites.caption = site;
        self
    }

    pub fn with_timestamp_site(mut self, site: SiteConfig) -> Self {
        self.config.sites.timestamp = site;
        self
    }

    pub fn with_thresholds(mut self, rows: Vec<Threshold>) -> Self {
        self.config.classifier.thresholds = ThresholdTable::new(rows);
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.config.output.log_level = level.to_string();
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.classifier.thresholds, ThresholdTable::default());
        assert_eq!(config.output.format, ReportFormat::Text);
        assert!(config.sites.caption.is_configured());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_store_path(PathBuf::from("/tmp/words.json"))
            .with_log_level("debug")
            .with_thresholds(vec![Threshold {
                ceiling_minutes: 60,
                max_occurrences: 3,
            }])
            .build();

        assert_eq!(config.store.path, PathBuf::from("/tmp/words.json"));
        assert_eq!(config.output.log_level, "debug");
        assert_eq!(config.classifier.thresholds.rows().len(), 1);
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let bad_rows = ConfigBuilder::new().with_thresholds(Vec::new()).build();
        assert!(bad_rows.validate().is_err());

        let no_selector = ConfigBuilder::new()
            .with_caption_site(SiteConfig::new("*://captions/*", ""))
            .build();
        assert!(no_selector.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConfigBuilder::new().with_format(ReportFormat::Json).build();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.output.format, ReportFormat::Json);
        assert_eq!(parsed.classifier.thresholds, config.classifier.thresholds);
        assert_eq!(parsed.sites.legacy, config.sites.legacy);
    }
}
