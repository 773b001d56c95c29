//! Todo List Component
//!
//! Loads the list on mount and renders the add form, filters, rows and
//! the completion summary.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::{CachedTodo, Mutation, QueryStatus};
use crate::commands;
use crate::components::{FilterBar, LatestReply, NewItemForm, TodoItem, TodoListSkeleton};
use crate::filter::{summarize, visible_todos};
use crate::models::TodoPatch;
use crate::mutations::{clear_completed, mutate, refetch};
use crate::store::{push_toast, use_app_store, AppStateStoreFields, ToastKind};

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_app_store();

    // Initial load
    Effect::new(move |_| {
        refetch(store);
    });

    let status = Memo::new(move |_| store.cache().read().status().clone());

    view! {
        {move || match status.get() {
            QueryStatus::Loading => view! { <TodoListSkeleton /> }.into_any(),
            QueryStatus::Failed(message) => view! {
                <div class="load-error">{format!("Error loading todos: {}", message)}</div>
            }.into_any(),
            QueryStatus::Ready => view! { <TodoListBody /> }.into_any(),
        }}
    }
}

#[component]
fn TodoListBody() -> impl IntoView {
    let store = use_app_store();

    let visible = Memo::new(move |_| {
        let filter = store.filter().get();
        let search = store.search().get();
        store.cache().with(|cache| visible_todos(cache.entries(), filter, &search))
    });
    let summary = Memo::new(move |_| summarize(store.cache().read().entries()));
    let has_entries = move || summary.get().total > 0;

    let on_update = Callback::new(move |(id, patch): (i64, TodoPatch)| {
        mutate(store, Mutation::Update { id, patch });
    });
    let on_delete = Callback::new(move |id: i64| {
        mutate(store, Mutation::Delete { id });
    });
    let on_load_latest = Callback::new(move |(id, reply): (i64, LatestReply)| {
        spawn_local(async move {
            match commands::get_todo_by_id(id).await {
                Ok(Some(latest)) => reply.run(Some(latest.content)),
                Ok(None) => {
                    reply.run(None);
                    push_toast(store, ToastKind::Error, "Error", "This todo no longer exists");
                    refetch(store);
                }
                Err(e) => {
                    let message = format!("[ITEM] get_todo_by_id({}) failed: {}", id, e);
                    web_sys::console::warn_1(&message.into());
                }
            }
        });
    });

    view! {
        <div class="todo-list">
            <NewItemForm />
            <FilterBar />

            <div class="todo-rows">
                <Show
                    when=move || !visible.get().is_empty()
                    fallback=move || {
                        let text = if has_entries() {
                            "No todos match the current filter."
                        } else {
                            "No todos yet. Add one above!"
                        };
                        view! { <p class="empty-state">{text}</p> }
                    }
                >
                    <For
                        each=move || visible.get()
                        key=|todo: &CachedTodo| {
                            (todo.id, todo.content.clone(), todo.completed, todo.updated_at)
                        }
                        children=move |todo: CachedTodo| {
                            view! {
                                <TodoItem
                                    todo=todo
                                    on_update=on_update
                                    on_delete=on_delete
                                    on_load_latest=on_load_latest
                                />
                            }
                        }
                    />
                </Show>
            </div>

            <Show when=has_entries>
                <div class="todo-summary">
                    <span>
                        {move || {
                            let s = summary.get();
                            format!("{} of {} completed", s.completed, s.total)
                        }}
                    </span>
                    <button
                        class="btn btn-outline btn-sm"
                        disabled=move || summary.get().completed == 0
                        on:click=move |_| clear_completed(store)
                    >
                        "Clear completed"
                    </button>
                </div>
            </Show>
        </div>
    }
}
