use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{
    BoardSettings, Players, Token, MAX_COLUMN, MAX_NUM_TO_WIN, MAX_PLAYERS, MAX_ROW, MIN_COLUMN,
    MIN_NUM_TO_WIN, MIN_PLAYERS, MIN_ROW,
};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: PlayersConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
    pub num_to_win: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let settings = BoardSettings::default();
        BoardConfig {
            rows: settings.rows,
            columns: settings.columns,
            num_to_win: settings.num_to_win,
        }
    }
}

impl BoardConfig {
    pub fn settings(&self) -> BoardSettings {
        BoardSettings {
            rows: self.rows,
            columns: self.columns,
            num_to_win: self.num_to_win,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub count: usize,
    /// Explicit tokens in turn order. Overrides `count` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            count: MIN_PLAYERS,
            tokens: None,
        }
    }
}

impl PlayersConfig {
    pub fn build(&self) -> Result<Players, ConfigError> {
        let players = match &self.tokens {
            Some(tokens) => Players::with_tokens(tokens.clone()),
            None => Players::new(self.count),
        };
        players.map_err(|e| ConfigError::Validation(format!("players: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "connect_x=debug".
    pub filter: String,
    /// Log file. The terminal UI only logs when this is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Filter directive to install, or `None` when nothing should be logged.
    ///
    /// With a log file the configured filter applies. Headless play without
    /// one shares stderr with the game, so only warnings get through there.
    /// The terminal UI owns the screen and logs only to a file.
    pub fn directive(&self, headless: bool) -> Option<&str> {
        match (&self.file, headless) {
            (Some(_), _) => Some(self.filter.as_str()),
            (None, true) => Some("warn"),
            (None, false) => None,
        }
    }
}

fn check_range(name: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{name} must be in {min}..={max}, got {value}"
        )))
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

    /// Load configuration from a TOML file, or `None` if the file does not
    /// exist. Nothing is logged, so this can run before a subscriber is set up.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_optional(path)? {
            Some(config) => Ok(config),
            None => {
                warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("board.rows", self.board.rows, MIN_ROW, MAX_ROW)?;
        check_range("board.columns", self.board.columns, MIN_COLUMN, MAX_COLUMN)?;
        check_range(
            "board.num_to_win",
            self.board.num_to_win,
            MIN_NUM_TO_WIN,
            MAX_NUM_TO_WIN,
        )?;
        if self.board.num_to_win > self.board.rows.max(self.board.columns) {
            return Err(ConfigError::Validation(
                "board.num_to_win must not exceed the larger of rows and columns".into(),
            ));
        }

        match &self.players.tokens {
            Some(tokens) => {
                if tokens.iter().any(|t| t.symbol().is_whitespace()) {
                    return Err(ConfigError::Validation(
                        "players.tokens must not contain whitespace".into(),
                    ));
                }
                self.players.build()?;
            }
            None => check_range("players.count", self.players.count, MIN_PLAYERS, MAX_PLAYERS)?,
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
