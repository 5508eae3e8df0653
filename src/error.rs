use std::path::PathBuf;

/// Rejected user input. Shown to the player as a message, never fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("invalid difficulty {0} (grid size must be between 2 and 10)")]
    InvalidDifficulty(u32),

    #[error("invalid completion time {0}")]
    InvalidTime(f64),
}

/// Errors from the key-value store backing the leaderboard.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when recording a leaderboard entry.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("invalid entry: {0}")]
    Invalid(#[from] InputError),

    #[error("failed to persist leaderboard: {0}")]
    Store(#[from] StoreError),
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

/// Errors that can occur when setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        assert_eq!(InputError::EmptyName.to_string(), "player name must not be empty");
        assert_eq!(
            InputError::InvalidDifficulty(0).to_string(),
            "invalid difficulty 0 (grid size must be between 2 and 10)"
        );
    }

    #[test]
    fn test_leaderboard_error_wraps_input() {
        let err = LeaderboardError::from(InputError::EmptyName);
        assert_eq!(err.to_string(), "invalid entry: player name must not be empty");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("gomoku.wins_needed must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: gomoku.wins_needed must be >= 1"
        );
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("data/schulte_ranking.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "I/O error on data/schulte_ranking.json: denied");
    }
}
