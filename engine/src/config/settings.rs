// Engine settings: embedded defaults, optionally overridden by a JSON file and CLI flags.
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../../config/default.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub data_path: PathBuf,
    pub csv_delimiter: String, // single ASCII character
    /// How many department cards the overview shows. All departments are still aggregated.
    pub top_departments: usize,
    pub output: OutputFormat,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_path: PathBuf::from("data/BRUDAM (2).csv"),
            csv_delimiter: ";".to_string(),
            top_departments: 5,
            output: OutputFormat::Text,
        }
    }
}

impl EngineSettings {
    /// Settings shipped with the binary (`config/default.json`).
    pub fn embedded() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let settings = Self::from_json(&raw)?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded settings file");
        Ok(settings)
    }

    fn from_json(raw: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.delimiter()?;
        if self.top_departments == 0 {
            return Err(EngineError::ConfigError(
                "top_departments must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn delimiter(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }
}
