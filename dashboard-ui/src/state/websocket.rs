//! WebSocket Client
//!
//! Persistent connection to the event stream. Every text frame is handed to
//! the dashboard dispatcher; on close the client reconnects with exponential
//! backoff and the backend's fresh snapshot resynchronises the page.

use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::GlobalState;

/// Reconnect attempts before giving up
const MAX_RECONNECT_ATTEMPTS: u32 = 5;
/// Upper bound for the reconnect delay
const MAX_RECONNECT_DELAY_MS: u32 = 30_000;

/// WebSocket client for the event stream
#[derive(Clone)]
pub struct WebSocketClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    reconnect_attempts: Rc<RefCell<u32>>,
    max_reconnect_attempts: u32,
    /// Set once the page closes the connection on purpose
    closing: Rc<Cell<bool>>,
}

impl WebSocketClient {
    /// Create a new WebSocket client
    pub fn new(url: &str) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(RefCell::new(0)),
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            closing: Rc::new(Cell::new(false)),
        }
    }

    /// Connect to the WebSocket server
    pub fn connect(&self, state: GlobalState) {
        if self.closing.get() {
            return;
        }
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws, state);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                self.schedule_reconnect(state);
            }
        }
    }

    /// Set up WebSocket event handlers
    fn setup_handlers(&self, ws: &WebSocket, state: GlobalState) {
        // On open
        let state_clone = state.clone();
        let reconnect_clone = Rc::clone(&self.reconnect_attempts);
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            state_clone.ws_connected.set(true);
            *reconnect_clone.borrow_mut() = 0;
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message
        let state_clone = state.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text_str: String = text.into();
                state_clone.dispatch(&text_str);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        // On close
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into(),
            );
            state.connection_lost();
            if client.closing.get() {
                return;
            }
            client.schedule_reconnect(state.clone());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        // On error
        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Schedule a reconnect attempt
    fn schedule_reconnect(&self, state: GlobalState) {
        let attempts = *self.reconnect_attempts.borrow();
        if self.closing.get() {
            return;
        }
        if !reconnect_allowed(attempts, self.max_reconnect_attempts) {
            web_sys::console::error_1(&"Max reconnect attempts reached".into());
            state.show_error("Lost connection to the event stream");
            return;
        }

        let delay = reconnect_delay_ms(attempts);
        *self.reconnect_attempts.borrow_mut() = attempts + 1;

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(
                &format!("Attempting reconnect (attempt {})", client.reconnect_attempts.borrow()).into(),
            );
            client.connect(state);
        })
        .forget();
    }

    /// Close the connection for good; no reconnect follows
    pub fn close(&self) {
        self.closing.set(true);
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onclose(None);
            ws.set_onerror(None);
            ws.set_onmessage(None);
            let _ = ws.close();
        }
    }
}

fn reconnect_allowed(attempts: u32, max_attempts: u32) -> bool {
    attempts < max_attempts
}

/// Delay before reconnect attempt number `attempts` (0-based)
fn reconnect_delay_ms(attempts: u32) -> u32 {
    2_u32
        .saturating_pow(attempts)
        .saturating_mul(1000)
        .min(MAX_RECONNECT_DELAY_MS)
}

/// Stream URL: `?stream=` query parameter, else `/ws` on the page's host
pub fn stream_url() -> String {
    let location = match web_sys::window() {
        Some(window) => window.location(),
        None => return "ws://localhost:5001/ws".to_string(),
    };

    let from_query = location
        .search()
        .ok()
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("stream"));
    if let Some(url) = from_query {
        return url;
    }

    let scheme = match location.protocol().ok().as_deref() {
        Some("https:") => "wss",
        _ => "ws",
    };
    let host = location.host().unwrap_or_else(|_| "localhost:5001".to_string());
    format!("{}://{}/ws", scheme, host)
}

/// Initialize the stream connection (call from app root)
pub fn init_websocket(state: GlobalState, url: &str) -> WebSocketClient {
    let client = WebSocketClient::new(url);
    client.connect(state);
    client
}
