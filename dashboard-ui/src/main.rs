//! Posture Dashboard
//!
//! Live trigger dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Running trigger count
//! - Newest-first photo gallery
//! - Hourly bar chart for today
//! - WebSocket live updates with reconnect
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. State and protocol handling live in the `posture-dashboard`
//! crate; this crate only projects that state into the page.

use leptos::*;
use wasm_bindgen::JsCast;

use posture_dashboard::DashboardError;

mod app;
mod components;
mod state;

/// Element the dashboard mounts into
const MOUNT_POINT: &str = "dashboard";

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_POINT))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(root) => mount_to(root, || view! { <app::App /> }),
        None => {
            let err = DashboardError::MissingAnchor(format!("#{}", MOUNT_POINT));
            web_sys::console::error_1(&err.to_string().into());
        }
    }
}
