//! Global Application State
//!
//! Reactive state management using Leptos signals. The dashboard core owns
//! the logic; the signals here are the rendered projection of it.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use posture_dashboard::dashboard::{ChartConfig, DashboardClient, Surface, SystemClock};
use posture_dashboard::model::{Event, HourlyCounts};
use posture_dashboard::stream::Dispatcher;

/// The dispatcher driving this page
pub type PageDispatcher = Dispatcher<SignalSurface, SystemClock>;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Running total shown in the counter
    pub total: RwSignal<u64>,
    /// Gallery items, first child first
    pub gallery: RwSignal<Vec<GalleryItem>>,
    /// Chart data; every write is one redraw
    pub hourly: RwSignal<HourlyCounts>,
    /// Chart configuration, set once at startup
    pub chart_config: RwSignal<ChartConfig>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Time the last frame arrived (ms since epoch)
    pub last_frame: RwSignal<Option<i64>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    dispatcher: Rc<RefCell<PageDispatcher>>,
}

/// One photo in the gallery
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryItem {
    /// Insertion sequence number, unique per page load
    pub id: u64,
    pub image_url: String,
    pub timestamp: String,
}

/// [`Surface`] writing into the page signals
pub struct SignalSurface {
    total: RwSignal<u64>,
    gallery: RwSignal<Vec<GalleryItem>>,
    hourly: RwSignal<HourlyCounts>,
    chart_config: RwSignal<ChartConfig>,
    next_id: u64,
}

impl Surface for SignalSurface {
    fn init_chart(&mut self, config: &ChartConfig) {
        self.chart_config.set(config.clone());
        self.hourly.set(HourlyCounts::new());
    }

    fn set_total(&mut self, total: u64) {
        self.total.set(total);
    }

    fn clear_gallery(&mut self) {
        self.gallery.update(|items| items.clear());
    }

    fn prepend_photo(&mut self, event: &Event) {
        let item = GalleryItem {
            id: self.next_id,
            image_url: event.image_url().to_string(),
            timestamp: event.timestamp().to_string(),
        };
        self.next_id += 1;
        self.gallery.update(|items| items.insert(0, item));
    }

    fn update_chart(&mut self, counts: &HourlyCounts) {
        self.hourly.set(*counts);
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let total = create_rw_signal(0);
    let gallery = create_rw_signal(Vec::new());
    let hourly = create_rw_signal(HourlyCounts::new());
    let chart_config = create_rw_signal(ChartConfig::hourly());

    let surface = SignalSurface {
        total,
        gallery,
        hourly,
        chart_config,
        next_id: 0,
    };
    let client = DashboardClient::new(surface, SystemClock::default());

    let state = GlobalState {
        total,
        gallery,
        hourly,
        chart_config,
        ws_connected: create_rw_signal(false),
        last_frame: create_rw_signal(None),
        error: create_rw_signal(None),
        dispatcher: Rc::new(RefCell::new(Dispatcher::new(client))),
    };

    provide_context(state);
}

impl GlobalState {
    /// Apply one inbound frame
    pub fn dispatch(&self, frame: &str) {
        self.last_frame.set(Some(chrono::Utc::now().timestamp_millis()));

        // Signal writes re-run effects synchronously, so release the borrow
        // before reporting anything back into the page.
        let result = self.dispatcher.borrow_mut().dispatch_frame(frame);
        if let Err(e) = result {
            web_sys::console::error_1(&format!("Failed to apply frame: {}", e).into());
            self.show_error(&e.to_string());
        }
    }

    /// The socket closed; the snapshot sent on reconnect replaces everything
    pub fn connection_lost(&self) {
        self.ws_connected.set(false);
        self.dispatcher.borrow_mut().connection_lost();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
