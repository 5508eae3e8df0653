use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub const MIN_DIFFICULTY: u32 = 2;
pub const MAX_DIFFICULTY: u32 = 10;

/// One completed Schulte run, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Grid size (3 means 3×3)
    pub difficulty: u32,
    /// Seconds, rounded to two decimals
    pub time: f64,
    /// Completion date, unix seconds
    pub date: u64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, difficulty: u32, elapsed: Duration, date: u64) -> Self {
        LeaderboardEntry {
            name: name.trim().to_string(),
            difficulty,
            time: round_centis(elapsed.as_secs_f64()),
            date,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.trim().is_empty() {
            return Err(InputError::EmptyName);
        }
        validate_difficulty(self.difficulty)?;
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(InputError::InvalidTime(self.time));
        }
        Ok(())
    }
}

pub fn validate_difficulty(difficulty: u32) -> Result<(), InputError> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(())
    } else {
        Err(InputError::InvalidDifficulty(difficulty))
    }
}

fn round_centis(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Render seconds as `MM:SS.cc`.
pub fn format_time(secs: f64) -> String {
    let centis = (secs.max(0.0) * 100.0).round() as u64;
    let minutes = centis / 6000;
    let seconds = (centis % 6000) / 100;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rounds_and_trims() {
        let entry = LeaderboardEntry::new("  Alice ", 3, Duration::from_millis(12_346), 1_700_000_000);
        assert_eq!(entry.name, "Alice");
        assert!((entry.time - 12.35).abs() < 1e-9);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        let mut entry = LeaderboardEntry::new("Bob", 4, Duration::from_secs(3), 0);
        entry.name = "   ".into();
        assert_eq!(entry.validate(), Err(InputError::EmptyName));

        let mut entry = LeaderboardEntry::new("Bob", 0, Duration::from_secs(3), 0);
        assert_eq!(entry.validate(), Err(InputError::InvalidDifficulty(0)));
        entry.difficulty = 11;
        assert_eq!(entry.validate(), Err(InputError::InvalidDifficulty(11)));

        let mut entry = LeaderboardEntry::new("Bob", 4, Duration::from_secs(3), 0);
        entry.time = -1.0;
        assert_eq!(entry.validate(), Err(InputError::InvalidTime(-1.0)));
        entry.time = f64::NAN;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_json_schema() {
        let entry = LeaderboardEntry::new("Alice", 3, Duration::from_millis(8_500), 1_700_000_000);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Alice",
                "difficulty": 3,
                "time": 8.5,
                "date": 1_700_000_000u64
            })
        );
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(8.5), "00:08.50");
        assert_eq!(format_time(61.07), "01:01.07");
        assert_eq!(format_time(3599.99), "59:59.99");
        assert_eq!(format_time(-3.0), "00:00.00");
    }
}
