//! Text surface
//!
//! Renders the counter, gallery and hourly chart as plain text. Used by the
//! CLI to show a replayed stream.

use std::collections::VecDeque;
use std::fmt::Write;

use crate::dashboard::{ChartConfig, Surface};
use crate::model::{Event, HourlyCounts};

const BAR_CHAR: char = '#';

/// Plain-text rendering of the dashboard
#[derive(Debug, Clone)]
pub struct TextSurface {
    total: u64,
    gallery: VecDeque<(String, String)>,
    chart: ChartConfig,
    counts: HourlyCounts,
    bar_width: usize,
    redraws: usize,
}

impl TextSurface {
    /// `bar_width` is the length of the longest bar
    pub fn new(bar_width: usize) -> Self {
        Self {
            total: 0,
            gallery: VecDeque::new(),
            chart: ChartConfig::hourly(),
            counts: HourlyCounts::new(),
            bar_width: bar_width.max(1),
            redraws: 0,
        }
    }

    /// Number of chart redraws so far
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// The counter text
    pub fn counter_text(&self) -> String {
        self.total.to_string()
    }

    /// Gallery image references, first child first
    pub fn gallery_urls(&self) -> Vec<&str> {
        self.gallery.iter().map(|(url, _)| url.as_str()).collect()
    }

    /// Current chart data
    pub fn chart_data(&self) -> &HourlyCounts {
        &self.counts
    }

    /// Render the whole dashboard
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Total triggers: {}", self.counter_text());
        let _ = writeln!(out);

        let _ = writeln!(out, "Photo gallery (newest first):");
        if self.gallery.is_empty() {
            let _ = writeln!(out, "  (no photos)");
        }
        for (idx, (url, timestamp)) in self.gallery.iter().enumerate() {
            let _ = writeln!(out, "  {:>3}. {}  {}", idx + 1, url, timestamp);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "{} per hour (today):", self.chart.dataset_label);
        out.push_str(&self.render_chart());
        out
    }

    /// Render only the bar chart
    pub fn render_chart(&self) -> String {
        let mut out = String::new();
        let y_max = self.chart.y_max(self.counts.peak()) as usize;
        let label_width = self.chart.labels.iter().map(|l| l.len()).max().unwrap_or(0);

        for (hour, label) in self.chart.labels.iter().enumerate() {
            let count = self.counts.get(hour);
            let bar_len = (count as usize * self.bar_width).div_ceil(y_max);
            let bar: String = std::iter::repeat(BAR_CHAR).take(bar_len).collect();

            if count > 0 {
                let _ = writeln!(out, "{:>width$} | {} {}", label, bar, count, width = label_width);
            } else {
                let _ = writeln!(out, "{:>width$} |", label, width = label_width);
            }
        }
        out
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new(40)
    }
}

impl Surface for TextSurface {
    fn init_chart(&mut self, config: &ChartConfig) {
        self.chart = config.clone();
        self.counts = HourlyCounts::new();
    }

    fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    fn clear_gallery(&mut self) {
        self.gallery.clear();
    }

    fn prepend_photo(&mut self, event: &Event) {
        self.gallery
            .push_front((event.image_url().to_string(), event.timestamp().to_string()));
    }

    fn update_chart(&mut self, counts: &HourlyCounts) {
        self.counts = *counts;
        self.redraws += 1;
    }
}
