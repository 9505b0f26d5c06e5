use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::game::{PlayerIdentity, Players, Rgb};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Where player names and colors come from.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    /// JSON payload file. When unset the fallback players are used.
    pub source: Option<PathBuf>,
    pub fallback_one: PlayerIdentity,
    pub fallback_two: PlayerIdentity,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            source: None,
            fallback_one: PlayerIdentity::new("Player 1", "#FF0000"),
            fallback_two: PlayerIdentity::new("Player 2", "#0000FF"),
        }
    }
}

impl PlayersConfig {
    pub fn fallback_players(&self) -> Players {
        Players::new(self.fallback_one.clone(), self.fallback_two.clone())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll interval in milliseconds.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { tick_ms: 100 }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file. The terminal UI only logs when this is set.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(&self.level).map_err(|_| {
            ConfigError::Validation(format!("logging.level '{}' is not a log level", self.level))
        })
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::Validation("ui.tick_ms must be > 0".into()));
        }
        self.logging.level()?;

        for (key, identity) in [
            ("players.fallback_one", &self.players.fallback_one),
            ("players.fallback_two", &self.players.fallback_two),
        ] {
            if Rgb::from_hex(&identity.color_hex).is_err() {
                return Err(ConfigError::Validation(format!(
                    "{key}.color_hex must be #RRGGBB"
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
