//! Dashboard client
//!
//! ## Architecture
//!
//! - **DashboardClient**: applies snapshots and live events to the state
//! - **Surface**: the counter, gallery and chart regions it paints
//! - **Clock**: decides which calendar day the histogram shows
//! - **ChartConfig**: fixed 24-bucket bar chart settings

mod chart;
mod client;
mod clock;
mod surface;

pub use chart::{hour_labels, ChartConfig};
pub use client::{DashboardClient, SnapshotSummary, WarningOutcome};
pub use clock::{Clock, DayBoundary, FixedClock, SystemClock};
pub use surface::Surface;
