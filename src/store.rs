//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::cache::TodoCache;
use crate::filter::StatusFilter;

const TOAST_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Cached todo list and fetch bookkeeping
    pub cache: TodoCache,
    /// Status filter for the list
    pub filter: StatusFilter,
    /// Search text for the list
    pub search: String,
    /// Number of create requests in flight
    pub creating: u32,
    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            cache: TodoCache::new(),
            ..Self::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast and dismiss it after a few seconds
pub fn push_toast(store: AppStore, kind: ToastKind, title: &str, description: impl Into<String>) {
    let Some(id) = store.next_toast_id().try_update(|next| {
        *next += 1;
        *next
    }) else {
        return;
    };
    store.toasts().write().push(Toast {
        id,
        kind,
        title: title.to_string(),
        description: description.into(),
    });

    spawn_local(async move {
        TimeoutFuture::new(TOAST_MS).await;
        dismiss_toast(store, id);
    });
}

pub fn dismiss_toast(store: AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}
