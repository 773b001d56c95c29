//! Toast Notifications

use leptos::prelude::*;

use crate::store::{dismiss_toast, use_app_store, AppStateStoreFields, ToastKind};

/// Renders the store's toasts in the top-right corner
#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| dismiss_toast(store, id)>
                            <div class="toast-title">{toast.title}</div>
                            <div class="toast-description">{toast.description}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
