//! Hourly chart configuration
//!
//! Fixed configuration for the 24-category bar chart. Renderers read it once
//! when the chart is created; only the data changes afterwards.

use serde::Serialize;

use crate::model::HOURS_PER_DAY;

/// Bar chart configuration shared by every renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    /// Category labels, `"0:00"` through `"23:00"`
    pub labels: Vec<String>,
    /// Dataset name
    pub dataset_label: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    /// Y axis starts at zero
    pub begin_at_zero: bool,
    /// Y axis tick step; 1 keeps ticks on whole counts
    pub y_step: u32,
    pub show_legend: bool,
    /// Resize with the container
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
}

impl ChartConfig {
    /// The trigger-per-hour chart
    pub fn hourly() -> Self {
        Self {
            labels: hour_labels(),
            dataset_label: "Trigger Count".to_string(),
            background_color: "rgba(66, 153, 225, 0.6)".to_string(),
            border_color: "rgba(66, 153, 225, 1)".to_string(),
            border_width: 1,
            border_radius: 5,
            begin_at_zero: true,
            y_step: 1,
            show_legend: false,
            responsive: true,
            maintain_aspect_ratio: false,
        }
    }

    /// Upper bound of the y axis for a given peak, rounded up to the step
    pub fn y_max(&self, peak: u32) -> u32 {
        let step = self.y_step.max(1);
        let top = peak.max(1);
        top.div_ceil(step) * step
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::hourly()
    }
}

/// `"0:00"`, `"1:00"`, ... `"23:00"`
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|h| format!("{}:00", h)).collect()
}
