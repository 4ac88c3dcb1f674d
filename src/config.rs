//! Configuration file handling.
//!
//! All batch parameters come from a single JSON or TOML file, using the same
//! camelCase keys as the original `appsettings.json` deployments. Every key
//! is required; there are no defaults.

use serde::Deserialize;
use thiserror::Error;

use crate::prelude::*;

/// Default configuration file path, relative to the current directory.
pub const DEFAULT_CONFIG_PATH: &str = "getulio.toml";

/// A required configuration key was missing or empty.
#[derive(Debug, Error)]
#[error("missing required configuration key `{key}`")]
pub struct MissingKeyError {
    /// The camelCase key name, as it appears in the config file.
    pub key: &'static str,
}

/// Validated batch configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned (non-recursively) for `*.pdf` files.
    pub input_directory_name: String,

    /// Directory receiving the `.ocr.txt` and `.info.txt` outputs.
    pub output_directory_name: String,

    /// GCP project ID.
    pub project_id: String,

    /// Document AI location ID (for example `us` or `eu`).
    pub location_id: String,

    /// Document AI processor ID.
    pub processor_id: String,
}

/// On-disk form of [`Config`], before required-key validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    input_directory_name: Option<String>,
    output_directory_name: Option<String>,
    project_id: Option<String>,
    location_id: Option<String>,
    processor_id: Option<String>,
}

impl Config {
    /// Load and validate a configuration file. JSON and TOML are both
    /// accepted, chosen by file extension.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Config> {
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let ext = path.extension().unwrap_or_default();
        let raw: RawConfig = if ext == "json" {
            serde_json::from_str(&data).with_context(|| {
                format!("Failed to parse JSON config file {:?}", path)
            })?
        } else {
            toml::from_str(&data).with_context(|| {
                format!("Failed to parse TOML config file {:?}", path)
            })?
        };
        let config = raw.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }
}

impl RawConfig {
    /// Check that every required key is present and non-empty.
    fn validate(self) -> Result<Config, MissingKeyError> {
        Ok(Config {
            input_directory_name: require(
                self.input_directory_name,
                "inputDirectoryName",
            )?,
            output_directory_name: require(
                self.output_directory_name,
                "outputDirectoryName",
            )?,
            project_id: require(self.project_id, "projectId")?,
            location_id: require(self.location_id, "locationId")?,
            processor_id: require(self.processor_id, "processorId")?,
        })
    }
}

/// Treat a missing or empty value as a missing key.
fn require(
    value: Option<String>,
    key: &'static str,
) -> Result<String, MissingKeyError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(MissingKeyError { key }),
    }
}
