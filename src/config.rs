//! Configuration management for the dataset generator

use crate::error::GeneratorError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dataset generation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output file name inside `output_dir`
    pub filename: String,
    /// Directory the output file is written to (created if missing)
    pub output_dir: String,
    /// Total number of records to generate
    pub total_records: i64,
    /// Number of records per batch
    pub chunk_size: i64,
    /// Seed for the random stream
    pub seed: u64,
    /// End of the timestamp window (RFC 3339); current time when unset
    pub anchor: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            filename: "fraud_data.csv".to_string(),
            output_dir: "output".to_string(),
            total_records: 500_000,
            chunk_size: 50_000,
            seed: 42,
            anchor: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Validated generation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StreamPlan {
    pub destination: PathBuf,
    pub total_records: usize,
    pub chunk_size: usize,
    pub seed: u64,
    pub anchor: DateTime<Utc>,
}

impl GeneratorConfig {
    /// Validate the settings into a [`StreamPlan`].
    ///
    /// Non-positive counts and unparseable anchors are `InvalidArgument`.
    pub fn plan(&self) -> Result<StreamPlan, GeneratorError> {
        let total_records = positive("total_records", self.total_records)?;
        let chunk_size = positive("chunk_size", self.chunk_size)?;

        let anchor = match &self.anchor {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| GeneratorError::invalid(format!("anchor {raw:?}: {e}")))?,
            None => Utc::now(),
        };

        Ok(StreamPlan {
            destination: Path::new(&self.output_dir).join(&self.filename),
            total_records,
            chunk_size,
            seed: self.seed,
            anchor,
        })
    }
}

fn positive(name: &str, value: i64) -> Result<usize, GeneratorError> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            GeneratorError::invalid(format!("{name} must be positive, got {value}"))
        })
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Path::new("config/config.toml");
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.generator.total_records, 500_000);
        assert_eq!(config.generator.chunk_size, 50_000);
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.logging.level, "info");

        let plan = config.generator.plan().unwrap();
        assert_eq!(plan.destination, Path::new("output").join("fraud_data.csv"));
        assert_eq!(plan.total_records, 500_000);
    }

    #[test]
    fn test_non_positive_counts_rejected() {
        for (total, chunk) in [(0, 10), (-5, 10), (10, 0), (10, -1)] {
            let config = GeneratorConfig {
                total_records: total,
                chunk_size: chunk,
                ..Default::default()
            };
            assert!(config.plan().unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_anchor_parsing() {
        let config = GeneratorConfig {
            anchor: Some("2025-01-31T10:00:00+02:00".to_string()),
            ..Default::default()
        };
        let plan = config.plan().unwrap();
        assert_eq!(plan.anchor.to_rfc3339(), "2025-01-31T08:00:00+00:00");

        let config = GeneratorConfig {
            anchor: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(config.plan().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[generator]\ntotal_records = 1200\nseed = 7\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.generator.total_records, 1200);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.chunk_size, 50_000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
