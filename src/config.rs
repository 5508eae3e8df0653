use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::game::{GameMode, MatchRules, WIN_LENGTH};
use crate::leaderboard::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Gomoku match settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GomokuConfig {
    pub board_size: usize,
    pub mode: GameMode,
    pub wins_needed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_limit: Option<u32>,
    pub opponent_delay_ms: u64,
    pub round_transition_ms: u64,
}

impl Default for GomokuConfig {
    fn default() -> Self {
        GomokuConfig {
            board_size: 15,
            mode: GameMode::PlayerVsComputer,
            wins_needed: 2,
            round_limit: None,
            opponent_delay_ms: 500,
            round_transition_ms: 2000,
        }
    }
}

impl GomokuConfig {
    pub fn rules(&self) -> MatchRules {
        MatchRules {
            board_size: self.board_size,
            wins_needed: self.wins_needed,
            round_limit: self.round_limit,
        }
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    pub fn round_transition(&self) -> Duration {
        Duration::from_millis(self.round_transition_ms)
    }
}

/// Schulte grid settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchulteConfig {
    /// Grid sizes offered on the start screen
    pub sizes: Vec<u32>,
    pub default_size: u32,
    /// How long a wrong click stays highlighted
    pub flash_ms: u64,
}

impl Default for SchulteConfig {
    fn default() -> Self {
        SchulteConfig {
            sizes: vec![3, 4, 5, 6, 7],
            default_size: 3,
            flash_ms: 200,
        }
    }
}

impl SchulteConfig {
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

/// Leaderboard storage settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub storage_dir: PathBuf,
    pub key: String,
    pub max_entries: usize,
    pub display_limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        LeaderboardConfig {
            storage_dir: PathBuf::from("data"),
            key: "schulte_ranking".to_string(),
            max_entries: 100,
            display_limit: 20,
        }
    }
}

/// Log output settings. `RUST_LOG` overrides `level`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file for the terminal UI; without one the UI does not log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: Some(PathBuf::from("gomoku-schulte.log")),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gomoku: GomokuConfig,
    pub schulte: SchulteConfig,
    pub leaderboard: LeaderboardConfig,
    pub logging: LoggingConfig,
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
    /// does not exist. The fallback is reported on stderr because logging is
    /// configured from the result.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gomoku;
        if g.board_size < WIN_LENGTH || g.board_size > 25 {
            return Err(ConfigError::Validation(format!(
                "gomoku.board_size must be in [{WIN_LENGTH}, 25]"
            )));
        }
        if g.wins_needed == 0 {
            return Err(ConfigError::Validation(
                "gomoku.wins_needed must be >= 1".into(),
            ));
        }
        if let Some(limit) = g.round_limit {
            if limit < g.wins_needed {
                return Err(ConfigError::Validation(
                    "gomoku.round_limit must be >= gomoku.wins_needed".into(),
                ));
            }
        }

        let s = &self.schulte;
        if s.sizes.is_empty() {
            return Err(ConfigError::Validation(
                "schulte.sizes must not be empty".into(),
            ));
        }
        if let Some(bad) = s
            .sizes
            .iter()
            .find(|&&n| !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&n))
        {
            return Err(ConfigError::Validation(format!(
                "schulte.sizes entry {bad} must be in [{MIN_DIFFICULTY}, {MAX_DIFFICULTY}]"
            )));
        }
        if !s.sizes.contains(&s.default_size) {
            return Err(ConfigError::Validation(
                "schulte.default_size must be one of schulte.sizes".into(),
            ));
        }

        let l = &self.leaderboard;
        if l.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "leaderboard.key must not be empty".into(),
            ));
        }
        if l.max_entries == 0 {
            return Err(ConfigError::Validation(
                "leaderboard.max_entries must be >= 1".into(),
            ));
        }
        if l.display_limit == 0 {
            return Err(ConfigError::Validation(
                "leaderboard.display_limit must be >= 1".into(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".into(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[gomoku]
mode = "pvp"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gomoku.mode, GameMode::PlayerVsPlayer);
        // Other fields should be defaults
        assert_eq!(config.gomoku.board_size, 15);
        assert_eq!(config.gomoku.wins_needed, 2);
        assert_eq!(config.leaderboard.max_entries, 100);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.gomoku.opponent_delay_ms, default.gomoku.opponent_delay_ms);
        assert_eq!(config.schulte.sizes, default.schulte.sizes);
        assert_eq!(config.leaderboard.key, "schulte_ranking");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let toml_str = r#"
[gomoku]
mode = "cvc"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_rules_from_config() {
        let mut config = AppConfig::default();
        config.gomoku.round_limit = Some(5);
        let rules = config.gomoku.rules();
        assert_eq!(rules.board_size, 15);
        assert_eq!(rules.wins_needed, 2);
        assert_eq!(rules.round_limit, Some(5));
        assert_eq!(config.gomoku.opponent_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_validation_rejects_small_board() {
        let mut config = AppConfig::default();
        config.gomoku.board_size = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_wins() {
        let mut config = AppConfig::default();
        config.gomoku.wins_needed = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_round_limit_below_wins() {
        let mut config = AppConfig::default();
        config.gomoku.round_limit = Some(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_sizes() {
        let mut config = AppConfig::default();
        config.schulte.sizes = vec![];
        assert!(config.validate().is_err());

        config.schulte.sizes = vec![3, 11];
        assert!(config.validate().is_err());

        config.schulte.sizes = vec![4, 5];
        config.schulte.default_size = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_entries() {
        let mut config = AppConfig::default();
        config.leaderboard.max_entries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_display_limit() {
        let mut config = AppConfig::default();
        config.leaderboard.display_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_key() {
        let mut config = AppConfig::default();
        config.leaderboard.key = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.gomoku.board_size, 15);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[schulte]
sizes = [4, 5]
default_size = 4

[leaderboard]
display_limit = 10
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.schulte.sizes, vec![4, 5]);
        assert_eq!(config.leaderboard.display_limit, 10);
        // Others are defaults
        assert_eq!(config.gomoku.round_transition_ms, 2000);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[gomoku]\nwins_needed = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.logging.file, AppConfig::default().logging.file);
    }
}
