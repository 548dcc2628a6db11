//! Trigger events
//!
//! An [`Event`] is one trigger occurrence reported by the monitor: when it
//! happened and where its photo can be fetched. Events are never edited once
//! received, so the type exposes read accessors only.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Offset-less layouts accepted for event timestamps. These are read as
/// wall-clock time, so the hour is taken as written.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp
pub const DATE_KEY_LEN: usize = 10;

/// A single trigger occurrence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// ISO-8601 date-time, kept verbatim as sent by the backend
    timestamp: String,
    /// Reference to the trigger photo
    image_url: String,
}

impl Event {
    /// Create a new event
    pub fn new(timestamp: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            image_url: image_url.into(),
        }
    }

    /// Raw timestamp string
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Photo reference
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// The `YYYY-MM-DD` prefix of the timestamp, if it is long enough
    pub fn date_key(&self) -> Option<&str> {
        date_key(&self.timestamp)
    }

    /// Whether the timestamp's date prefix equals the prefix of `today`.
    ///
    /// This is a raw string comparison; no timezone conversion happens.
    pub fn is_on(&self, today: &str) -> bool {
        match (self.date_key(), date_key(today)) {
            (Some(event_day), Some(today)) => event_day == today,
            _ => false,
        }
    }

    /// Hour-of-day of this event in the local timezone
    pub fn hour(&self) -> DashboardResult<u32> {
        event_hour(&self.timestamp)
    }
}

/// First ten characters of an ISO timestamp
pub fn date_key(timestamp: &str) -> Option<&str> {
    timestamp.get(..DATE_KEY_LEN)
}

/// Extract the local hour-of-day from an event timestamp
pub fn event_hour(timestamp: &str) -> DashboardResult<u32> {
    event_hour_in(timestamp, &Local)
}

/// Extract the hour-of-day of `timestamp` as seen in `tz`.
///
/// Timestamps with an explicit offset are converted into `tz`. Offset-less
/// date-times are wall-clock values and keep their written hour. A bare date
/// is UTC midnight.
pub fn event_hour_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> DashboardResult<u32> {
    let ts = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt.with_timezone(tz).hour());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, format) {
            return Ok(naive.hour());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).with_timezone(tz).hour());
        }
    }

    Err(DashboardError::InvalidTimestamp {
        timestamp: timestamp.to_string(),
        reason: "not an ISO-8601 date or date-time".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_event_deserialize() {
        let json = r#"{"timestamp": "2024-01-01T09:15:00", "image_url": "/uploads/a.jpg"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.timestamp(), "2024-01-01T09:15:00");
        assert_eq!(event.image_url(), "/uploads/a.jpg");
    }

    #[test]
    fn test_event_missing_field_rejected() {
        let json = r#"{"timestamp": "2024-01-01T09:15:00"}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_date_key() {
        let event = Event::new("2024-01-01T09:15:00.123456", "a.jpg");
        assert_eq!(event.date_key(), Some("2024-01-01"));
        assert_eq!(date_key("2024-01"), None);
    }

    #[test]
    fn test_is_on_compares_prefix_only() {
        let event = Event::new("2024-01-01T23:59:59+09:00", "a.jpg");
        assert!(event.is_on("2024-01-01"));
        assert!(event.is_on("2024-01-01T00:00:00Z"));
        assert!(!event.is_on("2024-01-02"));
        assert!(!Event::new("bogus", "a.jpg").is_on("2024-01-01"));
    }

    #[test]
    fn test_naive_hour_taken_as_written() {
        assert_eq!(event_hour("2024-01-01T09:15:00").unwrap(), 9);
        assert_eq!(event_hour("2024-01-01T23:45:10.500000").unwrap(), 23);
        assert_eq!(event_hour("2024-01-01 07:05").unwrap(), 7);
    }

    #[test]
    fn test_offset_hour_converted() {
        assert_eq!(event_hour_in("2024-01-01T09:15:00Z", &Utc).unwrap(), 9);
        assert_eq!(event_hour_in("2024-01-01T09:15:00+02:00", &Utc).unwrap(), 7);

        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(event_hour_in("2024-01-01T23:30:00Z", &plus_one).unwrap(), 0);
    }

    #[test]
    fn test_date_only_is_utc_midnight() {
        assert_eq!(event_hour_in("2024-01-01", &Utc).unwrap(), 0);
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(event_hour_in("2024-01-01", &minus_five).unwrap(), 19);
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = event_hour("not a date").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidTimestamp { .. }));
        assert!(event_hour("2024-13-01T10:00:00").is_err());
    }
}
