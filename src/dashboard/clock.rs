//! Calendar day source
//!
//! The histogram only counts events dated "today". Which day that is comes
//! from a [`Clock`], so rendering can be pinned to a fixed date.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which calendar decides where a day starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// UTC date, as the browser's `toISOString()` reports it
    #[default]
    Utc,
    /// The viewer's local date
    Local,
}

impl std::str::FromStr for DayBoundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utc" => Ok(DayBoundary::Utc),
            "local" => Ok(DayBoundary::Local),
            other => Err(format!("unknown day boundary: {}", other)),
        }
    }
}

/// Source of the current date key (`YYYY-MM-DD`)
pub trait Clock {
    fn today_key(&self) -> String;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today_key(&self) -> String {
        (**self).today_key()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub boundary: DayBoundary,
}

impl SystemClock {
    pub fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }
}

impl Clock for SystemClock {
    fn today_key(&self) -> String {
        match self.boundary {
            DayBoundary::Utc => Utc::now().format("%Y-%m-%d").to_string(),
            DayBoundary::Local => Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// A clock stuck on one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    today: String,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse a `YYYY-MM-DD` date
    pub fn parse(today: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(today, "%Y-%m-%d").map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today_key(&self) -> String {
        self.today.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::parse("2024-01-01").unwrap();
        assert_eq!(clock.today_key(), "2024-01-01");
        assert!(FixedClock::parse("01/01/2024").is_err());
    }

    #[test]
    fn test_system_clock_key_shape() {
        let key = SystemClock::default().today_key();
        assert_eq!(key.len(), 10);
        assert!(NaiveDate::parse_from_str(&key, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_day_boundary_from_str() {
        assert_eq!("UTC".parse::<DayBoundary>().unwrap(), DayBoundary::Utc);
        assert_eq!("local".parse::<DayBoundary>().unwrap(), DayBoundary::Local);
        assert!("mars".parse::<DayBoundary>().is_err());
    }
}
