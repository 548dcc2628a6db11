//! Photo Gallery Component
//!
//! Trigger photos, newest first. No limit, no deduplication.

use leptos::*;

use crate::state::GlobalState;

/// Gallery container
#[component]
pub fn PhotoGallery() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="photo-gallery" class="grid grid-cols-2 md:grid-cols-4 gap-4">
            <For
                each=move || state.gallery.get()
                key=|item| item.id
                children=move |item| view! {
                    <div class="photo-item" title=item.timestamp>
                        <img
                            src=item.image_url
                            alt="Trigger photo"
                            class="w-full rounded-lg border border-gray-700"
                        />
                    </div>
                }
            />
        </div>
    }
}
