//! Calendar source for daily seeds and random-puzzle ids.

use chrono::Local;

pub trait Clock {
    /// Today as `YYYY-MM-DD` in the local zone. Also the daily seed.
    fn today(&self) -> String;
    /// Timestamp-like token naming a random puzzle.
    fn token(&self) -> String;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn token(&self) -> String {
        Local::now().timestamp_millis().to_string()
    }
}

/// Clock pinned to one day, for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    pub day: String,
    pub token: String,
}

impl FixedClock {
    pub fn new(day: &str) -> Self {
        Self {
            day: day.to_string(),
            token: format!("{}-random", day),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.day.clone()
    }

    fn token(&self) -> String {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_day_format() {
        let day = LocalClock.today();
        assert_eq!(day.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&day, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_fixed_clock() {
        let c = FixedClock::new("2024-01-01");
        assert_eq!(c.today(), "2024-01-01");
        assert_ne!(c.token(), c.today());
    }
}
