//! New Item Form Component
//!
//! Form for creating new todos.

use leptos::prelude::*;

use crate::cache::Mutation;
use crate::mutations::run_mutation;
use crate::store::{use_app_store, AppStateStoreFields};

/// Form for creating new todos; disabled while a create is in flight
#[component]
pub fn NewItemForm() -> impl IntoView {
    let store = use_app_store();

    let (new_text, set_new_text) = signal(String::new());
    let creating = move || store.creating().get() > 0;

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get();
        let content = text.trim();
        if content.is_empty() || creating() {
            return;
        }

        let mutation = Mutation::Create { content: content.to_string() };
        run_mutation(store, mutation, move |outcome| {
            // Keep the text on failure so it can be resubmitted
            if outcome.is_ok() {
                set_new_text.set(String::new());
            }
        });
    };

    view! {
        <form class="new-item-form" on:submit=create_item>
            <input
                type="text"
                class="input"
                placeholder="Add a new todo..."
                prop:value=move || new_text.get()
                disabled=creating
                on:input=move |ev| set_new_text.set(event_target_value(&ev))
            />
            <button type="submit" class="btn" disabled=creating>
                {move || if creating() { "Adding..." } else { "Add" }}
            </button>
        </form>
    }
}
