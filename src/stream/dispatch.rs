//! Frame dispatch
//!
//! Applies decoded frames to a [`DashboardClient`] strictly in arrival order.
//! Every frame is handled on its own: a frame that fails to decode is logged
//! and counted, and the next frame is processed normally.

use super::messages::StreamMessage;
use crate::dashboard::{Clock, DashboardClient, Surface, WarningOutcome};
use crate::error::DashboardResult;

/// Counters kept by the dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub snapshots: u64,
    pub warnings: u64,
    /// Frames that could not be decoded
    pub rejected_frames: u64,
    /// Snapshot elements dropped as malformed
    pub rejected_events: u64,
    /// Frames with an event name this client does not handle
    pub ignored_frames: u64,
}

/// Session phase as seen by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No snapshot received on the current connection yet
    AwaitingSnapshot,
    /// Snapshot applied; live events follow
    Live,
}

/// Single consumer of the inbound frames of one connection
pub struct Dispatcher<S, C> {
    client: DashboardClient<S, C>,
    sync: SyncState,
    stats: DispatchStats,
}

impl<S: Surface, C: Clock> Dispatcher<S, C> {
    pub fn new(client: DashboardClient<S, C>) -> Self {
        Self {
            client,
            sync: SyncState::AwaitingSnapshot,
            stats: DispatchStats::default(),
        }
    }

    /// Decode and apply one text frame.
    ///
    /// Returns the decode error when the frame is rejected; the dashboard is
    /// left as it was.
    pub fn dispatch_frame(&mut self, frame: &str) -> DashboardResult<()> {
        match StreamMessage::parse(frame) {
            Ok(message) => {
                self.apply(message);
                Ok(())
            }
            Err(e) => {
                self.stats.rejected_frames += 1;
                tracing::warn!(error = %e, "Rejected stream frame");
                Err(e)
            }
        }
    }

    /// Apply an already decoded message
    pub fn apply(&mut self, message: StreamMessage) {
        match message {
            StreamMessage::InitialData { events, rejected } => {
                self.stats.snapshots += 1;
                self.stats.rejected_events += rejected as u64;
                if self.sync == SyncState::Live {
                    tracing::info!("Snapshot received on a live session; replacing dashboard");
                }
                let wire_len = events.len() + rejected;
                self.client.handle_snapshot_of_len(events, wire_len);
                self.sync = SyncState::Live;
            }
            StreamMessage::NewWarning(event) => {
                self.stats.warnings += 1;
                if self.sync == SyncState::AwaitingSnapshot {
                    tracing::warn!("Live event arrived before the snapshot");
                }
                if let WarningOutcome::Unplottable = self.client.handle_new_warning(event) {
                    tracing::debug!("Live event kept out of the histogram");
                }
            }
            StreamMessage::Unknown { event } => {
                self.stats.ignored_frames += 1;
                tracing::debug!(event = %event, "Ignoring unknown stream event");
            }
        }
    }

    /// The connection dropped; the next snapshot resynchronises the dashboard
    pub fn connection_lost(&mut self) {
        if self.sync == SyncState::Live {
            tracing::info!("Connection lost; awaiting fresh snapshot");
        }
        self.sync = SyncState::AwaitingSnapshot;
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn client(&self) -> &DashboardClient<S, C> {
        &self.client
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FixedClock;
    use crate::render::TextSurface;

    fn dispatcher() -> Dispatcher<TextSurface, FixedClock> {
        let client = DashboardClient::new(
            TextSurface::new(20),
            FixedClock::parse("2024-01-01").unwrap(),
        );
        Dispatcher::new(client)
    }

    const SNAPSHOT: &str = r#"{"event":"initial_data","data":[
        {"timestamp":"2024-01-01T09:15:00","image_url":"a.jpg"},
        {"timestamp":"2024-01-01T09:45:00","image_url":"b.jpg"}]}"#;

    #[test]
    fn test_snapshot_then_warnings() {
        let mut d = dispatcher();
        d.dispatch_frame(SNAPSHOT).unwrap();
        assert_eq!(d.sync_state(), SyncState::Live);

        for _ in 0..3 {
            d.dispatch_frame(
                r#"{"event":"new_warning","data":{"timestamp":"2024-01-01T11:00:00","image_url":"c.jpg"}}"#,
            )
            .unwrap();
        }

        let state = d.client().state();
        assert_eq!(state.total_count(), 5);
        assert_eq!(state.hourly()[9], 2);
        assert_eq!(state.hourly()[11], 3);
        assert_eq!(d.stats().snapshots, 1);
        assert_eq!(d.stats().warnings, 3);
    }

    #[test]
    fn test_bad_frame_does_not_stop_processing() {
        let mut d = dispatcher();
        d.dispatch_frame(SNAPSHOT).unwrap();

        assert!(d.dispatch_frame("{not json").is_err());
        assert!(d
            .dispatch_frame(r#"{"event":"new_warning","data":{"image_url":"x.jpg"}}"#)
            .is_err());
        d.dispatch_frame(
            r#"{"event":"new_warning","data":{"timestamp":"2024-01-01T09:00:00","image_url":"d.jpg"}}"#,
        )
        .unwrap();

        assert_eq!(d.stats().rejected_frames, 2);
        assert_eq!(d.client().state().total_count(), 3);
        assert_eq!(d.client().state().hourly()[9], 3);
    }

    #[test]
    fn test_unknown_event_ignored() {
        let mut d = dispatcher();
        d.dispatch_frame(r#"{"event":"connect"}"#).unwrap();
        assert_eq!(d.stats().ignored_frames, 1);
        assert_eq!(d.sync_state(), SyncState::AwaitingSnapshot);
        assert_eq!(d.client().state().total_count(), 0);
    }

    #[test]
    fn test_rejected_snapshot_elements_counted() {
        let mut d = dispatcher();
        d.dispatch_frame(
            r#"{"event":"initial_data","data":[{"timestamp":"2024-01-01T01:00:00","image_url":"a.jpg"},{"image_url":"b.jpg"},{"timestamp":"2024-01-01T02:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(d.stats().rejected_events, 2);
        assert_eq!(d.client().state().total_count(), 3);
        assert_eq!(d.client().surface().counter_text(), "3");
        assert_eq!(d.client().surface().gallery_urls(), vec!["a.jpg"]);
        assert_eq!(d.client().surface().chart_data().total(), 1);
        assert_eq!(d.client().surface().chart_data()[1], 1);
    }

    #[test]
    fn test_reconnect_resyncs_from_snapshot() {
        let mut d = dispatcher();
        d.dispatch_frame(SNAPSHOT).unwrap();
        d.dispatch_frame(
            r#"{"event":"new_warning","data":{"timestamp":"2024-01-01T12:00:00","image_url":"c.jpg"}}"#,
        )
        .unwrap();

        d.connection_lost();
        assert_eq!(d.sync_state(), SyncState::AwaitingSnapshot);

        d.dispatch_frame(SNAPSHOT).unwrap();
        assert_eq!(d.sync_state(), SyncState::Live);
        assert_eq!(d.client().state().total_count(), 2);
        assert_eq!(d.client().state().hourly()[12], 0);
    }
}
