//! Rendering surface
//!
//! The three regions the dashboard paints: a counter, a gallery container and
//! a chart. Implementations decide how they look; the client decides what
//! they show.

use super::chart::ChartConfig;
use crate::model::{Event, HourlyCounts};

/// Rendering collaborator driven by [`DashboardClient`](super::DashboardClient)
pub trait Surface {
    /// Build the chart once, with all-zero data
    fn init_chart(&mut self, config: &ChartConfig);

    /// Show the running total
    fn set_total(&mut self, total: u64);

    /// Remove every gallery item
    fn clear_gallery(&mut self);

    /// Insert one item as the first child of the gallery
    fn prepend_photo(&mut self, event: &Event);

    /// Replace the chart data and redraw. Each call is one redraw.
    fn update_chart(&mut self, counts: &HourlyCounts);
}
