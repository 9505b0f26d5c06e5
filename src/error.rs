use std::path::PathBuf;

/// Errors that can occur while fetching the player configuration.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to read player configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse player configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("player configuration contained no entries")]
    EmptyPayload,

    #[error("configuration source went away without a result")]
    Disconnected,
}

/// Errors that can occur when parsing a player color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidHex(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
