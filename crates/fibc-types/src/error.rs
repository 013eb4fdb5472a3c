//! Error types for fibc-calc

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Preset lookup and storage errors
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Unknown preset: {0}")]
    NotFound(String),

    #[error("Preset name must not be empty")]
    EmptyName,

    #[error("Built-in preset cannot be modified: {0}")]
    BuiltIn(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
