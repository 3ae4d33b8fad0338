//! Application configuration management.

use serde::{Deserialize, Serialize};

use crate::types::NumberFormat;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Report computation defaults.
    pub report: ReportConfig,
    /// Snapshot input for the command line reporter.
    pub snapshot: SnapshotConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// How a percentage change is reported when the comparative amount is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentagePolicy {
    /// The percentage is left undefined.
    #[default]
    Undefined,
    /// The percentage is reported as zero.
    Zero,
}

/// Report computation defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Policy applied when the previous year amount is zero.
    pub percentage_policy: PercentagePolicy,
    /// Number format used when a query does not carry one.
    pub number_format: NumberFormat,
}

/// Snapshot input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Path of the JSON snapshot (tenant, accounts, contacts, transactions).
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "tally=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
