//! Todo Item Component
//!
//! A single row: checkbox, text or inline editor, and edit/delete actions.
//! User intent, including the request for fresh text when editing
//! starts, is reported upward through the callbacks.

use leptos::prelude::*;

use crate::cache::CachedTodo;
use crate::components::DeleteConfirmButton;
use crate::models::TodoPatch;

/// Reply to a latest-content request: `None` when the todo is gone
pub type LatestReply = Callback<Option<String>>;

#[derive(Debug, PartialEq, Eq)]
enum LatestAction {
    Replace(String),
    Keep,
    Close,
}

/// Fresh text only replaces the editor while the user has not typed
fn latest_action(cached: &str, edited: &str, latest: Option<String>) -> LatestAction {
    match latest {
        None => LatestAction::Close,
        Some(text) if edited == cached && text != edited => LatestAction::Replace(text),
        Some(_) => LatestAction::Keep,
    }
}

#[component]
pub fn TodoItem(
    todo: CachedTodo,
    #[prop(into)] on_update: Callback<(i64, TodoPatch)>,
    #[prop(into)] on_delete: Callback<i64>,
    /// Asked for the stored text when editing starts
    #[prop(into)]
    on_load_latest: Callback<(i64, LatestReply)>,
) -> impl IntoView {
    // Unconfirmed entries have no server id yet and cannot be changed
    let server_id = todo.id.server_id();
    let pending = todo.is_pending();
    let completed = todo.completed;
    let content = StoredValue::new(todo.content.clone());

    let (editing, set_editing) = signal(false);
    let (edited, set_edited) = signal(todo.content);

    // Edit the latest stored text rather than a possibly stale copy
    let on_latest = Callback::new(move |latest: Option<String>| {
        if !editing.get_untracked() {
            return;
        }
        match latest_action(&content.get_value(), &edited.get_untracked(), latest) {
            LatestAction::Replace(text) => set_edited.set(text),
            LatestAction::Keep => {}
            LatestAction::Close => set_editing.set(false),
        }
    });

    let begin_edit = move |_: web_sys::MouseEvent| {
        let Some(id) = server_id else { return };
        set_edited.set(content.get_value());
        set_editing.set(true);
        on_load_latest.run((id, on_latest));
    };

    let submit_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = server_id else { return };
        let text = edited.get();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        on_update.run((id, TodoPatch::content(trimmed)));
        set_editing.set(false);
    };

    let cancel_edit = move |_: web_sys::MouseEvent| {
        set_editing.set(false);
        set_edited.set(content.get_value());
    };

    let toggle = move |ev: web_sys::Event| {
        if let Some(id) = server_id {
            on_update.run((id, TodoPatch::completed(event_target_checked(&ev))));
        }
    };

    let row_class = if pending { "todo-item pending" } else { "todo-item" };

    view! {
        <div class=row_class>
            <div class="todo-main">
                <input
                    type="checkbox"
                    prop:checked=completed
                    disabled=pending
                    on:change=toggle
                />
                {move || if editing.get() {
                    view! {
                        <form class="edit-form" on:submit=submit_edit>
                            <input
                                type="text"
                                class="input"
                                prop:value=move || edited.get()
                                on:input=move |ev| set_edited.set(event_target_value(&ev))
                                autofocus=true
                            />
                            <button type="submit" class="btn btn-sm">"Save"</button>
                            <button
                                type="button"
                                class="btn btn-outline btn-sm"
                                on:click=cancel_edit
                            >
                                "Cancel"
                            </button>
                        </form>
                    }.into_any()
                } else {
                    view! {
                        <span class={if completed { "todo-text completed" } else { "todo-text" }}>
                            {content.get_value()}
                        </span>
                    }.into_any()
                }}
            </div>
            <Show when=move || !editing.get()>
                <div class="todo-actions">
                    <button class="btn btn-outline btn-sm" disabled=pending on:click=begin_edit>
                        "Edit"
                    </button>
                    <DeleteConfirmButton
                        disabled=pending
                        on_confirm=move |_: ()| {
                            if let Some(id) = server_id {
                                on_delete.run(id);
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
