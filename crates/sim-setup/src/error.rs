use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a setup document.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid setup JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setup YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported setup file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, SetupError>;
