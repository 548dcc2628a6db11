//! # Posture Dashboard
//!
//! Live dashboard for posture-monitor triggers: a running count, a photo
//! gallery and an hourly bar chart, driven by a real-time event stream.
//!
//! ## Features
//!
//! - **Snapshot + live updates**: one `initial_data` history, then `new_warning` events
//! - **Hourly histogram**: today's triggers bucketed by local hour
//! - **Fail-open dispatch**: a malformed frame never stops the stream
//! - **Pluggable rendering**: browser (see `dashboard-ui`) or plain text
//!
//! ## Modules
//!
//! - [`model`]: Events, histogram and dashboard state
//! - [`dashboard`]: The client that keeps the rendered regions in sync
//! - [`stream`]: Wire messages, dispatch and the consumer task
//! - [`render`]: Text rendering
//! - [`config`]: TOML configuration (`runtime` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use posture_dashboard::dashboard::{DashboardClient, FixedClock};
//! use posture_dashboard::render::TextSurface;
//! use posture_dashboard::stream::Dispatcher;
//!
//! let clock = FixedClock::parse("2024-01-01").unwrap();
//! let mut dispatcher = Dispatcher::new(DashboardClient::new(TextSurface::default(), clock));
//!
//! dispatcher
//!     .dispatch_frame(r#"{"event":"initial_data","data":[{"timestamp":"2024-01-01T09:15:00","image_url":"a.jpg"}]}"#)
//!     .unwrap();
//!
//! assert_eq!(dispatcher.client().state().total_count(), 1);
//! println!("{}", dispatcher.client().surface().render());
//! ```

#[cfg(feature = "runtime")]
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod render;
pub mod stream;

// Re-export top-level types for convenience
pub use dashboard::{
    ChartConfig, Clock, DashboardClient, DayBoundary, FixedClock, SnapshotSummary, Surface,
    SystemClock, WarningOutcome,
};

pub use error::{DashboardError, DashboardResult};

pub use model::{compute_hourly_counts, DashboardState, Event, HourlyCounts};

pub use render::TextSurface;

pub use stream::{DispatchStats, Dispatcher, StreamMessage, SyncState};

#[cfg(feature = "runtime")]
pub use config::{Config, ConfigError};
