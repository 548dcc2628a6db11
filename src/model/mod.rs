//! Dashboard data model
//!
//! - [`Event`]: one trigger occurrence
//! - [`HourlyCounts`]: today's 24-bucket histogram
//! - [`DashboardState`]: the counter, gallery and histogram shown on screen

mod event;
mod histogram;
mod state;

pub use event::{date_key, event_hour, event_hour_in, Event, DATE_KEY_LEN};
pub use histogram::{compute_hourly_counts, HourlyCounts, HOURS_PER_DAY};
pub use state::DashboardState;
