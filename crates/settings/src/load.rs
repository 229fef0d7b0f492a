//! Reading and writing render settings files.
//!
//! The document mirrors [`RenderConfig`] key for key. YAML or JSON is chosen
//! by file extension; keys left out take their defaults.

use crate::config::RenderConfig;
use crate::shared::ValidatedConfig;
use crate::validate::ConfigError;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl RenderConfig {
    pub fn from_str_as(text: &str, format: ConfigFormat) -> Result<Self, LoadError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        })
    }

    pub fn to_string_as(&self, format: ConfigFormat) -> Result<String, LoadError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Parse a settings file without validating it.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_str_as(&text, format)?;
        tracing::debug!(path = %path.display(), ?format, "loaded render config");
        Ok(config)
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let text = self.to_string_as(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Load a settings file and validate it in one step.
pub fn load_validated(path: impl AsRef<Path>) -> Result<ValidatedConfig, LoadError> {
    Ok(RenderConfig::load_from_path(path)?.validated()?)
}
