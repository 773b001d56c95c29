//! Todo Frontend App
//!
//! Root component: provides the store and lays out the page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{GithubButton, RefreshButton, ToastHost, TodoList};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    provide_context(Store::new(AppState::new()));

    view! {
        <main class="app-layout">
            <header class="app-header">
                <h1>"Todo App"</h1>
                <div class="header-buttons">
                    <RefreshButton />
                    <GithubButton />
                </div>
            </header>
            <TodoList />
        </main>
        <ToastHost />
    }
}
