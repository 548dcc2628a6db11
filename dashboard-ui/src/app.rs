//! App Root Component
//!
//! Single-page dashboard with the global state provider and stream connection.

use leptos::*;

use crate::components::{HourlyChart, PhotoGallery, Toast, TriggerCounter};
use crate::state::{init_websocket, provide_global_state, stream_url, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    // One persistent connection per page load
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let url = stream_url();
    web_sys::console::log_1(&format!("Connecting to event stream at {}", url).into());
    let client = init_websocket(state, &url);
    on_cleanup(move || client.close());

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4 h-16 flex items-center space-x-3">
                    <span class="text-xl font-bold">"Posture Monitor"</span>
                </div>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8 pb-24 space-y-8">
                <section class="grid md:grid-cols-3 gap-8">
                    <TriggerCounter />

                    <div class="md:col-span-2 bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">"Triggers per hour (today)"</h2>
                        <HourlyChart />
                    </div>
                </section>

                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Photos"</h2>
                    <PhotoGallery />
                </section>
            </main>

            // Footer with connection status
            <Footer />

            <Toast />
        </div>
    }
}

/// Footer component showing connection status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // WebSocket status
                <div class="flex items-center space-x-2">
                    {move || {
                        if state.ws_connected.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Connected"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Disconnected"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                // Last frame time
                <div class="text-gray-400">
                    {move || {
                        state.last_frame.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Last update: {}", dt.with_timezone(&chrono::Local).format("%H:%M:%S")))
                            .unwrap_or_else(|| "Waiting for data".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}
