//! Header Buttons
//!
//! Refresh and project-link buttons shown next to the title.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::mutations::refetch;
use crate::store::{push_toast, use_app_store, AppStateStoreFields, ToastKind};

/// Refetches the list; the icon spins for at least half a second and
/// for as long as a fetch is in flight
#[component]
pub fn RefreshButton() -> impl IntoView {
    let store = use_app_store();
    let (is_refreshing, set_is_refreshing) = signal(false);
    let spinning = move || is_refreshing.get() || store.cache().read().is_fetching();

    let handle_refresh = move |_: web_sys::MouseEvent| {
        set_is_refreshing.set(true);
        refetch(store);
        spawn_local(async move {
            TimeoutFuture::new(500).await;
            set_is_refreshing.set(false);
        });
    };

    view! {
        <button
            class="btn btn-outline btn-icon"
            title="Refresh"
            on:click=handle_refresh
        >
            <span class=move || if spinning() { "icon spin" } else { "icon" }>"⟳"</span>
            <span class="sr-only">"Refresh list"</span>
        </button>
    }
}

/// Opens the project page in the system browser
#[component]
pub fn GithubButton() -> impl IntoView {
    let store = use_app_store();

    let open_page = move |_: web_sys::MouseEvent| {
        spawn_local(async move {
            if let Err(e) = commands::open_project_page().await {
                push_toast(store, ToastKind::Error, "Error", e);
            }
        });
    };

    view! {
        <button class="btn btn-outline btn-icon" title="GitHub" on:click=open_page>
            <span class="icon">"GH"</span>
            <span class="sr-only">"Github"</span>
        </button>
    }
}
