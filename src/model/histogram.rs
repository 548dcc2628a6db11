//! Hourly histogram
//!
//! Twenty-four per-hour counters for the current calendar day, and the pure
//! function that builds them from a batch of events.

use serde::Serialize;
use std::ops::Index;

use super::event::Event;

/// Number of buckets in the histogram, one per hour of the day
pub const HOURS_PER_DAY: usize = 24;

/// Per-hour trigger counts, index = hour of day (0-23)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HourlyCounts([u32; HOURS_PER_DAY]);

impl HourlyCounts {
    /// All-zero histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the bucket for `hour`. Out-of-range hours are ignored and
    /// reported as `false`.
    pub fn increment(&mut self, hour: u32) -> bool {
        match self.0.get_mut(hour as usize) {
            Some(bucket) => {
                *bucket = bucket.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Count for one hour, zero when out of range
    pub fn get(&self, hour: usize) -> u32 {
        self.0.get(hour).copied().unwrap_or(0)
    }

    /// Buckets in hour order
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all buckets
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| c as u64).sum()
    }

    /// Largest bucket value
    pub fn peak(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Whether every bucket is zero
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }
}

impl Index<usize> for HourlyCounts {
    type Output = u32;

    fn index(&self, hour: usize) -> &u32 {
        &self.0[hour]
    }
}

/// Build the histogram for `today` from a batch of events.
///
/// An event is counted when the first ten characters of its timestamp equal
/// the first ten characters of `today`; its bucket is the local hour of the
/// timestamp. Events dated today whose hour cannot be read are skipped.
pub fn compute_hourly_counts(events: &[Event], today: &str) -> HourlyCounts {
    let mut counts = HourlyCounts::new();

    for event in events.iter().filter(|e| e.is_on(today)) {
        match event.hour() {
            Ok(hour) => {
                counts.increment(hour);
            }
            Err(e) => {
                tracing::warn!(
                    timestamp = %event.timestamp(),
                    error = %e,
                    "Skipping event with unreadable hour"
                );
            }
        }
    }

    counts
}
