//! Dashboard state
//!
//! Client-local, derived state. Created empty, replaced by a snapshot, then
//! mutated one event at a time. Nothing here is persisted.

use std::collections::VecDeque;

use super::event::Event;
use super::histogram::HourlyCounts;

/// Everything the dashboard displays
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Number of events observed this session
    total_count: u64,
    /// Newest-first photo gallery, no eviction
    gallery: VecDeque<Event>,
    /// Today's per-hour counts
    hourly: HourlyCounts,
}

impl DashboardState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Gallery entries, newest first
    pub fn gallery(&self) -> impl Iterator<Item = &Event> {
        self.gallery.iter()
    }

    pub fn gallery_len(&self) -> usize {
        self.gallery.len()
    }

    pub fn hourly(&self) -> &HourlyCounts {
        &self.hourly
    }

    pub(crate) fn set_total_count(&mut self, total: u64) {
        self.total_count = total;
    }

    pub(crate) fn increment_total(&mut self) -> u64 {
        self.total_count = self.total_count.saturating_add(1);
        self.total_count
    }

    pub(crate) fn clear_gallery(&mut self) {
        self.gallery.clear();
    }

    pub(crate) fn prepend_photo(&mut self, event: Event) {
        self.gallery.push_front(event);
    }

    pub(crate) fn set_hourly(&mut self, hourly: HourlyCounts) {
        self.hourly = hourly;
    }

    pub(crate) fn hourly_mut(&mut self) -> &mut HourlyCounts {
        &mut self.hourly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = DashboardState::new();
        assert_eq!(state.total_count(), 0);
        assert_eq!(state.gallery_len(), 0);
        assert!(state.hourly().is_empty());
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let mut state = DashboardState::new();
        state.prepend_photo(Event::new("2024-01-01T09:00:00", "a.jpg"));
        state.prepend_photo(Event::new("2024-01-01T10:00:00", "b.jpg"));

        let urls: Vec<_> = state.gallery().map(|e| e.image_url()).collect();
        assert_eq!(urls, vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut state = DashboardState::new();
        let event = Event::new("2024-01-01T09:00:00", "a.jpg");
        state.prepend_photo(event.clone());
        state.prepend_photo(event);
        assert_eq!(state.gallery_len(), 2);
    }
}
