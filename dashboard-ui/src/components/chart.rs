//! Chart Component
//!
//! Hourly trigger bar chart drawn on an HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use posture_dashboard::dashboard::ChartConfig;
use posture_dashboard::model::HourlyCounts;

use crate::state::GlobalState;

/// Most y-axis ticks drawn before the step is widened
const MAX_Y_TICKS: u32 = 10;

/// Hourly bar chart component
#[component]
pub fn HourlyChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Responsive charts follow their container on resize
    let (resized, set_resized) = create_signal(());
    let resize_handle = window_event_listener(ev::resize, move |_| set_resized.set(()));
    on_cleanup(move || resize_handle.remove());

    // Redraw on every chart data write
    create_effect(move |_| {
        let counts = state.hourly.get();
        let config = state.chart_config.get();
        resized.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &counts, &config);
        }
    });

    view! {
        <div class="relative h-64 md:h-80">
            <canvas
                id="hourly-chart"
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-full rounded-lg"
            />
        </div>
    }
}

/// Draw the bar chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, counts: &HourlyCounts, config: &ChartConfig) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    if config.responsive {
        let client_width = canvas.client_width().max(0) as u32;
        if client_width > 0 {
            canvas.set_width(client_width);
        }
        if !config.maintain_aspect_ratio {
            let client_height = canvas.client_height().max(0) as u32;
            if client_height > 0 {
                canvas.set_height(client_height);
            }
        }
    }

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 40.0;
    let margin_right = 10.0;
    let margin_top = if config.show_legend { 30.0 } else { 10.0 };
    let margin_bottom = 30.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let y_max = config.y_max(counts.peak());
    let y_min = if config.begin_at_zero {
        0
    } else {
        counts.as_slice().iter().copied().min().unwrap_or(0)
    };
    let y_span = (y_max - y_min).max(1) as f64;
    let tick_step = tick_step(config.y_step, y_max - y_min);

    // Horizontal grid lines on whole counts
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&"#9ca3af".into()); // gray-400
    ctx.set_font("12px sans-serif");

    let mut tick = y_min;
    while tick <= y_max {
        let y = margin_top + chart_height - ((tick - y_min) as f64 / y_span) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();
        let _ = ctx.fill_text(&tick.to_string(), 5.0, y + 4.0);
        tick += tick_step;
    }

    // Bars
    let slot = chart_width / config.labels.len().max(1) as f64;
    let bar_width = slot * 0.8;

    for (hour, label) in config.labels.iter().enumerate() {
        let x = margin_left + hour as f64 * slot + (slot - bar_width) / 2.0;
        let value = counts.get(hour).saturating_sub(y_min);

        if value > 0 {
            let bar_height = (value as f64 / y_span) * chart_height;
            let y = margin_top + chart_height - bar_height;
            draw_bar(&ctx, x, y, bar_width, bar_height, config);
        }

        // Every other label keeps narrow charts readable
        if hour % 2 == 0 || slot > 40.0 {
            ctx.set_fill_style(&"#9ca3af".into());
            let _ = ctx.fill_text(label, x, height - 10.0);
        }
    }

    if config.show_legend {
        ctx.set_fill_style(&config.background_color.as_str().into());
        ctx.fill_rect(margin_left, 8.0, 12.0, 12.0);
        ctx.set_fill_style(&"#d1d5db".into());
        let _ = ctx.fill_text(&config.dataset_label, margin_left + 18.0, 18.0);
    }
}

/// One bar with rounded top corners
fn draw_bar(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, config: &ChartConfig) {
    let r = (config.border_radius as f64).min(w / 2.0).min(h);

    ctx.begin_path();
    ctx.move_to(x, y + h);
    ctx.line_to(x, y + r);
    let _ = ctx.arc_to(x, y, x + r, y, r);
    ctx.line_to(x + w - r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + r, r);
    ctx.line_to(x + w, y + h);
    ctx.close_path();

    ctx.set_fill_style(&config.background_color.as_str().into());
    ctx.fill();

    if config.border_width > 0 {
        ctx.set_stroke_style(&config.border_color.as_str().into());
        ctx.set_line_width(config.border_width as f64);
        ctx.stroke();
    }
}

/// Tick spacing: a multiple of `step` giving at most [`MAX_Y_TICKS`] ticks
fn tick_step(step: u32, span: u32) -> u32 {
    let step = step.max(1);
    let ticks = span / step;
    if ticks <= MAX_Y_TICKS {
        step
    } else {
        step * ticks.div_ceil(MAX_Y_TICKS)
    }
}
