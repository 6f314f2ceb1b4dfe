//! Converter configuration.

use crate::error::{ConverterError, Result};
use crate::{BLACKHOLE_HALF_EXTENT, DEFAULT_RESULT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable naming a YAML config file; read by the CLI's `--config`.
pub const CONFIG_ENV_VAR: &str = "SHIELD_CONVERTER_CONFIG";

/// Settings that do not belong to any single setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Title written on the first line of `geo.dat`.
    pub geometry_title: String,
    /// Suffix of the binary result files to parse.
    pub result_extension: String,
    /// Half edge length of the absorbing boundary cube (cm).
    pub blackhole_half_extent: f64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            geometry_title: format!("{}NAME{}", "x".repeat(28), "x".repeat(28)),
            result_extension: DEFAULT_RESULT_EXTENSION.to_string(),
            blackhole_half_extent: BLACKHOLE_HALF_EXTENT,
        }
    }
}

impl ConverterConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ConverterError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading converter configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConverterError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.blackhole_half_extent > 0.0) {
            return Err(ConverterError::InvalidConfig(format!(
                "blackhole_half_extent must be > 0, got {}",
                self.blackhole_half_extent
            )));
        }
        if self.result_extension.is_empty() {
            return Err(ConverterError::InvalidConfig(
                "result_extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
