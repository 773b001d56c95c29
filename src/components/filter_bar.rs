//! Filter Bar Component
//!
//! Status filter buttons and the search box.

use leptos::prelude::*;

use crate::filter::StatusFilter;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="filter-bar">
            <div class="filter-buttons">
                {StatusFilter::ALL.iter().map(|&filter| {
                    let is_selected = move || store.filter().get() == filter;
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if is_selected() {
                                    "btn btn-sm active"
                                } else {
                                    "btn btn-sm btn-outline"
                                }
                            }
                            on:click=move |_| store.filter().set(filter)
                        >
                            {filter.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <input
                type="search"
                class="input search-input"
                placeholder="Search..."
                prop:value=move || store.search().get()
                on:input=move |ev| store.search().set(event_target_value(&ev))
            />
        </div>
    }
}
