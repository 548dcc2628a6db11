//! Dashboard Client
//!
//! Owns [`DashboardState`] and projects it onto a [`Surface`] in response to
//! the two inbound stream messages: a one-time snapshot and incremental
//! single events.

use super::chart::ChartConfig;
use super::clock::Clock;
use super::surface::Surface;
use crate::model::{compute_hourly_counts, DashboardState, Event};

/// Result of applying a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotSummary {
    /// New running total
    pub total: u64,
    /// Events that landed in today's histogram
    pub charted: u64,
}

/// What happened to the chart for one incremental event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningOutcome {
    /// Counted in the bucket for `hour` and redrawn
    Charted { hour: u32 },
    /// Dated on another day; chart untouched
    OutsideToday,
    /// Dated today but the hour could not be read; chart untouched
    Unplottable,
}

/// Maintains and renders the dashboard
pub struct DashboardClient<S, C> {
    state: DashboardState,
    surface: S,
    clock: C,
    chart: ChartConfig,
}

impl<S: Surface, C: Clock> DashboardClient<S, C> {
    /// Create the client and paint the empty dashboard
    pub fn new(mut surface: S, clock: C) -> Self {
        let chart = ChartConfig::hourly();
        let state = DashboardState::new();

        surface.init_chart(&chart);
        surface.set_total(state.total_count());

        Self {
            state,
            surface,
            clock,
            chart,
        }
    }

    /// Replace the whole dashboard with a snapshot of past events.
    ///
    /// Each event is inserted at the front of the gallery in input order, so
    /// the last event of the snapshot ends up displayed first.
    pub fn handle_snapshot(&mut self, events: Vec<Event>) -> SnapshotSummary {
        let wire_len = events.len();
        self.handle_snapshot_of_len(events, wire_len)
    }

    /// Apply a snapshot whose wire array held `wire_len` elements, some of
    /// which may have been dropped as unreadable.
    ///
    /// The total follows the wire length; only the decoded `events` reach the
    /// gallery and the chart.
    pub fn handle_snapshot_of_len(
        &mut self,
        events: Vec<Event>,
        wire_len: usize,
    ) -> SnapshotSummary {
        let today = self.clock.today_key();
        let total = wire_len.max(events.len()) as u64;

        self.state.set_total_count(total);
        self.surface.set_total(total);

        self.state.clear_gallery();
        self.surface.clear_gallery();

        let hourly = compute_hourly_counts(&events, &today);
        for event in events {
            self.add_photo_to_gallery(event);
        }

        self.state.set_hourly(hourly);
        self.surface.update_chart(&hourly);

        tracing::info!(total, today = %today, charted = hourly.total(), "Snapshot applied");

        SnapshotSummary {
            total,
            charted: hourly.total(),
        }
    }

    /// Apply one live event.
    ///
    /// The total and gallery always change. The chart only changes when the
    /// event is dated today, and is then redrawn once for this event.
    pub fn handle_new_warning(&mut self, event: Event) -> WarningOutcome {
        let total = self.state.increment_total();
        self.surface.set_total(total);

        let today = self.clock.today_key();
        let outcome = if event.is_on(&today) {
            match event.hour() {
                Ok(hour) => {
                    self.state.hourly_mut().increment(hour);
                    self.surface.update_chart(self.state.hourly());
                    WarningOutcome::Charted { hour }
                }
                Err(e) => {
                    tracing::warn!(
                        timestamp = %event.timestamp(),
                        error = %e,
                        "Event dated today has unreadable hour; chart not updated"
                    );
                    WarningOutcome::Unplottable
                }
            }
        } else {
            WarningOutcome::OutsideToday
        };

        tracing::debug!(
            total,
            image_url = %event.image_url(),
            outcome = ?outcome,
            "New warning applied"
        );

        self.add_photo_to_gallery(event);
        outcome
    }

    /// Insert one event at the front of the gallery
    pub fn add_photo_to_gallery(&mut self, event: Event) {
        self.surface.prepend_photo(&event);
        self.state.prepend_photo(event);
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn chart_config(&self) -> &ChartConfig {
        &self.chart
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FixedClock;
    use crate::model::HourlyCounts;

    /// Records every call made against it
    #[derive(Default)]
    struct RecordingSurface {
        chart_inits: usize,
        total: Option<u64>,
        gallery: Vec<String>,
        chart: HourlyCounts,
        redraws: usize,
    }

    impl Surface for RecordingSurface {
        fn init_chart(&mut self, _config: &ChartConfig) {
            self.chart_inits += 1;
        }

        fn set_total(&mut self, total: u64) {
            self.total = Some(total);
        }

        fn clear_gallery(&mut self) {
            self.gallery.clear();
        }

        fn prepend_photo(&mut self, event: &Event) {
            self.gallery.insert(0, event.image_url().to_string());
        }

        fn update_chart(&mut self, counts: &HourlyCounts) {
            self.chart = *counts;
            self.redraws += 1;
        }
    }

    fn client() -> DashboardClient<RecordingSurface, FixedClock> {
        DashboardClient::new(
            RecordingSurface::default(),
            FixedClock::parse("2024-01-01").unwrap(),
        )
    }

    fn event(ts: &str, url: &str) -> Event {
        Event::new(ts, url)
    }

    #[test]
    fn test_new_paints_empty_dashboard() {
        let client = client();
        assert_eq!(client.surface().chart_inits, 1);
        assert_eq!(client.surface().total, Some(0));
        assert!(client.surface().gallery.is_empty());
        assert_eq!(client.chart_config().labels.len(), 24);
    }

    #[test]
    fn test_snapshot_scenario() {
        let mut client = client();
        let summary = client.handle_snapshot(vec![
            event("2024-01-01T09:15:00", "a.jpg"),
            event("2024-01-01T09:45:00", "b.jpg"),
        ]);

        assert_eq!(summary, SnapshotSummary { total: 2, charted: 2 });
        assert_eq!(client.state().total_count(), 2);
        assert_eq!(client.surface().total, Some(2));
        assert_eq!(client.surface().gallery, vec!["b.jpg", "a.jpg"]);
        assert_eq!(client.surface().chart[9], 2);
        assert_eq!(client.surface().chart.total(), 2);
        assert_eq!(client.surface().redraws, 1);
    }

    #[test]
    fn test_snapshot_gallery_is_reverse_of_input() {
        let mut client = client();
        let urls = ["1.jpg", "2.jpg", "3.jpg", "4.jpg"];
        client.handle_snapshot(
            urls.iter()
                .map(|u| event("2023-06-01T12:00:00", u))
                .collect(),
        );

        let mut expected: Vec<_> = urls.iter().map(|u| u.to_string()).collect();
        expected.reverse();
        assert_eq!(client.surface().gallery, expected);

        let state_urls: Vec<_> = client.state().gallery().map(|e| e.image_url()).collect();
        assert_eq!(state_urls, vec!["4.jpg", "3.jpg", "2.jpg", "1.jpg"]);
    }

    #[test]
    fn test_snapshot_total_follows_wire_length() {
        let mut client = client();
        let summary =
            client.handle_snapshot_of_len(vec![event("2024-01-01T09:15:00", "a.jpg")], 3);

        assert_eq!(summary, SnapshotSummary { total: 3, charted: 1 });
        assert_eq!(client.state().total_count(), 3);
        assert_eq!(client.surface().total, Some(3));
        assert_eq!(client.surface().gallery, vec!["a.jpg"]);

        client.handle_new_warning(event("2024-01-01T10:00:00", "b.jpg"));
        assert_eq!(client.state().total_count(), 4);
    }

    #[test]
    fn test_empty_snapshot() {
        let mut client = client();
        client.handle_snapshot(Vec::new());

        assert_eq!(client.surface().total, Some(0));
        assert!(client.surface().gallery.is_empty());
        assert!(client.surface().chart.is_empty());
    }

    #[test]
    fn test_snapshot_replaces_previous_state() {
        let mut client = client();
        client.handle_snapshot(vec![event("2024-01-01T08:00:00", "old.jpg")]);
        client.handle_new_warning(event("2024-01-01T08:30:00", "live.jpg"));
        client.handle_snapshot(vec![event("2024-01-01T10:00:00", "fresh.jpg")]);

        assert_eq!(client.state().total_count(), 1);
        assert_eq!(client.surface().gallery, vec!["fresh.jpg"]);
        assert_eq!(client.state().hourly()[8], 0);
        assert_eq!(client.state().hourly()[10], 1);
    }

    #[test]
    fn test_total_after_snapshot_and_warnings() {
        let mut client = client();
        client.handle_snapshot(vec![
            event("2024-01-01T01:00:00", "a.jpg"),
            event("2023-12-31T01:00:00", "b.jpg"),
            event("2023-12-30T01:00:00", "c.jpg"),
        ]);
        for i in 0..5 {
            client.handle_new_warning(event("2024-01-01T02:00:00", &format!("live{}.jpg", i)));
        }

        assert_eq!(client.state().total_count(), 8);
        assert_eq!(client.surface().total, Some(8));
        assert_eq!(client.surface().gallery.len(), 8);
        assert_eq!(client.surface().gallery[0], "live4.jpg");
    }

    #[test]
    fn test_yesterday_warning_counts_but_not_charted() {
        let mut client = client();
        client.handle_snapshot(vec![event("2024-01-01T09:15:00", "a.jpg")]);
        let before = *client.state().hourly();
        let redraws = client.surface().redraws;

        let outcome = client.handle_new_warning(event("2023-12-31T09:15:00", "y.jpg"));

        assert_eq!(outcome, WarningOutcome::OutsideToday);
        assert_eq!(client.state().total_count(), 2);
        assert_eq!(client.surface().gallery[0], "y.jpg");
        assert_eq!(*client.state().hourly(), before);
        assert_eq!(client.surface().redraws, redraws);
    }

    #[test]
    fn test_same_hour_warnings_redraw_each_time() {
        let mut client = client();
        client.handle_snapshot(Vec::new());
        let redraws = client.surface().redraws;

        let first = client.handle_new_warning(event("2024-01-01T14:01:00", "a.jpg"));
        let second = client.handle_new_warning(event("2024-01-01T14:59:00", "b.jpg"));

        assert_eq!(first, WarningOutcome::Charted { hour: 14 });
        assert_eq!(second, WarningOutcome::Charted { hour: 14 });
        assert_eq!(client.surface().chart[14], 2);
        assert_eq!(client.surface().redraws, redraws + 2);
    }

    #[test]
    fn test_unplottable_warning_still_counted() {
        let mut client = client();
        client.handle_snapshot(Vec::new());

        let outcome = client.handle_new_warning(event("2024-01-01Tlate", "x.jpg"));

        assert_eq!(outcome, WarningOutcome::Unplottable);
        assert_eq!(client.state().total_count(), 1);
        assert_eq!(client.surface().gallery, vec!["x.jpg"]);
        assert!(client.state().hourly().is_empty());

        let next = client.handle_new_warning(event("2024-01-01T03:00:00", "y.jpg"));
        assert_eq!(next, WarningOutcome::Charted { hour: 3 });
    }

    #[test]
    fn test_warning_before_snapshot_applies_to_empty_state() {
        let mut client = client();
        client.handle_new_warning(event("2024-01-01T05:00:00", "early.jpg"));
        assert_eq!(client.state().total_count(), 1);
        assert_eq!(client.state().hourly()[5], 1);
    }
}
