//! Trigger Counter Component
//!
//! Running total of triggers seen this session.

use leptos::*;

use crate::state::GlobalState;

/// Counter display
#[component]
pub fn TriggerCounter() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="bg-gray-800 rounded-lg p-6 border border-gray-700">
            <span class="text-gray-400 text-sm">"Total triggers"</span>
            <div id="total-triggers-count" class="text-5xl font-bold mt-2">
                {move || state.total.get().to_string()}
            </div>
        </div>
    }
}
