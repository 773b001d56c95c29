//! Loading Placeholders

use leptos::prelude::*;

const PLACEHOLDER_ROWS: usize = 5;

/// Placeholder shaped like a single todo row
#[component]
pub fn TodoSkeleton() -> impl IntoView {
    view! {
        <div class="todo-item skeleton-row">
            <div class="todo-main">
                <span class="skeleton skeleton-box"></span>
                <span class="skeleton skeleton-line"></span>
            </div>
            <div class="todo-actions">
                <span class="skeleton skeleton-button"></span>
                <span class="skeleton skeleton-button"></span>
            </div>
        </div>
    }
}

/// Placeholder for the whole list while the first fetch is pending
#[component]
pub fn TodoListSkeleton() -> impl IntoView {
    view! {
        <div class="todo-list-skeleton">
            <div class="new-item-form">
                <span class="skeleton skeleton-input"></span>
                <span class="skeleton skeleton-button"></span>
            </div>
            {(0..PLACEHOLDER_ROWS).map(|_| view! { <TodoSkeleton /> }).collect_view()}
        </div>
    }
}
