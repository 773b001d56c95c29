//! Query and Mutation Glue
//!
//! Connects the procedure client to the cache: list fetches guarded by
//! tickets, and mutations that apply optimistically, roll back on failure,
//! and always refetch once settled.
//!
//! The state changes of a mutation live in `begin_mutation`,
//! `finish_mutation` and `settle_mutation`, which only touch `AppState`.
//! `run_mutation` drives them around the actual command call.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::cache::{Mutation, PendingMutation, PhaseError};
use crate::commands;
use crate::filter::completed_ids;
use crate::models::TodoPatch;
use crate::store::{push_toast, AppState, AppStateStoreFields, AppStore, ToastKind};

/// Toast to show once a mutation's outcome is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ToastKind,
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    fn success(description: &str) -> Self {
        Self {
            kind: ToastKind::Success,
            title: "Success!",
            description: description.to_string(),
        }
    }

    fn error(description: &str) -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Error",
            description: description.to_string(),
        }
    }
}

/// Apply `mutation` to the cache and count it if it is a create
pub fn begin_mutation(
    state: &mut AppState,
    mutation: Mutation,
    now: DateTime<Utc>,
) -> Result<PendingMutation, PhaseError> {
    let mut pending = PendingMutation::new(mutation);
    pending.apply(&mut state.cache, now)?;
    if pending.mutation().is_create() {
        state.creating += 1;
    }
    Ok(pending)
}

/// Keep or roll back the optimistic effect according to `outcome`.
///
/// The create counter is released even when the phase is wrong.
pub fn finish_mutation(
    state: &mut AppState,
    pending: &mut PendingMutation,
    outcome: &Result<(), String>,
) -> Result<Option<Notice>, PhaseError> {
    if pending.mutation().is_create() {
        state.creating = state.creating.saturating_sub(1);
    }

    match outcome {
        Ok(()) => {
            pending.confirm()?;
            Ok(match pending.mutation() {
                Mutation::Create { .. } => Some(Notice::success("Todo added successfully")),
                Mutation::Delete { .. } => Some(Notice::success("Todo deleted successfully")),
                Mutation::Update { .. } => None,
            })
        }
        Err(message) => {
            pending.fail(&mut state.cache)?;
            Ok(Some(Notice::error(message)))
        }
    }
}

/// Settle the mutation; the list is stale afterwards either way
pub fn settle_mutation(
    state: &mut AppState,
    pending: &mut PendingMutation,
) -> Result<(), PhaseError> {
    let settled = pending.settle(&mut state.cache);
    if settled.is_err() {
        state.cache.invalidate();
    }
    settled
}

fn log_phase_error(e: &PhaseError) {
    web_sys::console::error_1(&format!("[MUTATION] {}", e).into());
}

/// Fetch the list; the result is dropped if a mutation canceled it meanwhile
pub fn refetch(store: AppStore) {
    let ticket = store.cache().write().begin_fetch();

    spawn_local(async move {
        let result = commands::list_todos().await;
        let error = result.as_ref().err().cloned();

        let applied = store.cache().write().complete_fetch(ticket, result);
        if let (true, Some(message)) = (applied, error) {
            web_sys::console::warn_1(&format!("[LIST] fetch failed: {}", message).into());
            // The first load shows its own error panel
            if store.cache().read_untracked().is_loaded() {
                push_toast(store, ToastKind::Error, "Error", message);
            }
        }
    });
}

/// Fire-and-forget variant of `run_mutation`
pub fn mutate(store: AppStore, mutation: Mutation) {
    run_mutation(store, mutation, |_| {});
}

/// Apply `mutation` optimistically, send it, then reconcile.
///
/// `on_done` runs after the outcome is known and before the refetch.
pub fn run_mutation<F>(store: AppStore, mutation: Mutation, on_done: F)
where
    F: FnOnce(Result<(), String>) + 'static,
{
    let begun = store.try_update(|state| begin_mutation(state, mutation, Utc::now()));
    let mut pending = match begun {
        Some(Ok(pending)) => pending,
        Some(Err(e)) => {
            log_phase_error(&e);
            return;
        }
        None => return,
    };

    spawn_local(async move {
        let outcome = send(pending.mutation()).await;
        if let Err(message) = &outcome {
            web_sys::console::warn_1(&format!("[MUTATION] rolled back: {}", message).into());
        }

        match store.try_update(|state| finish_mutation(state, &mut pending, &outcome)) {
            Some(Ok(Some(notice))) => {
                push_toast(store, notice.kind, notice.title, notice.description)
            }
            Some(Err(e)) => log_phase_error(&e),
            _ => {}
        }

        on_done(outcome);

        if let Some(Err(e)) = store.try_update(|state| settle_mutation(state, &mut pending)) {
            log_phase_error(&e);
        }
        if store.cache().read_untracked().is_stale() {
            refetch(store);
        }
    });
}

async fn send(mutation: &Mutation) -> Result<(), String> {
    match mutation {
        Mutation::Create { content } => commands::create_todo(content).await.map(|_| ()),
        Mutation::Update { id, patch } => commands::update_todo(*id, patch).await.map(|_| ()),
        Mutation::Delete { id } => commands::delete_todo(*id).await.map(|_| ()),
    }
}

/// Reset every completed todo, one update per item
pub fn clear_completed(store: AppStore) {
    let ids = completed_ids(store.cache().read_untracked().entries());
    for id in ids {
        mutate(store, Mutation::Update { id, patch: TodoPatch::completed(false) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{EntryId, MutationPhase, TodoCache};
    use crate::models::Todo;

    fn todo(id: i64, content: &str, completed: bool) -> Todo {
        let at = Utc::now();
        Todo {
            id,
            content: content.to_string(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    fn loaded_state(todos: Vec<Todo>) -> AppState {
        let mut cache = TodoCache::new();
        let ticket = cache.begin_fetch();
        assert!(cache.complete_fetch(ticket, Ok(todos)));
        AppState {
            cache,
            ..AppState::new()
        }
    }

    fn create(content: &str) -> Mutation {
        Mutation::Create {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_create_success_releases_counter_and_refetches() {
        let mut state = loaded_state(vec![todo(1, "a", false)]);

        let mut pending = begin_mutation(&mut state, create("milk"), Utc::now()).unwrap();
        assert_eq!(state.creating, 1);
        assert_eq!(state.cache.entries().len(), 2);
        assert!(state.cache.entries()[1].is_pending());

        let notice = finish_mutation(&mut state, &mut pending, &Ok(())).unwrap();
        assert_eq!(state.creating, 0);
        assert_eq!(notice, Some(Notice::success("Todo added successfully")));
        assert_eq!(pending.phase(), MutationPhase::Confirmed);
        assert_eq!(state.cache.entries().len(), 2);

        settle_mutation(&mut state, &mut pending).unwrap();
        assert_eq!(pending.phase(), MutationPhase::Settled);
        assert!(state.cache.is_stale());
    }

    #[test]
    fn test_create_failure_rolls_back_and_toasts() {
        let mut state = loaded_state(vec![todo(1, "a", false)]);
        let before = state.cache.entries().to_vec();

        let mut pending = begin_mutation(&mut state, create("milk"), Utc::now()).unwrap();
        assert_eq!(state.creating, 1);

        let outcome = Err("Invalid input: content must not be empty".to_string());
        let notice = finish_mutation(&mut state, &mut pending, &outcome).unwrap().unwrap();
        assert_eq!(state.creating, 0);
        assert_eq!(notice.kind, ToastKind::Error);
        assert_eq!(notice.description, "Invalid input: content must not be empty");
        assert_eq!(state.cache.entries(), &before[..]);

        settle_mutation(&mut state, &mut pending).unwrap();
        assert!(state.cache.is_stale());
    }

    #[test]
    fn test_update_success_is_silent() {
        let mut state = loaded_state(vec![todo(1, "a", false)]);
        let mutation = Mutation::Update {
            id: 1,
            patch: TodoPatch::completed(true),
        };

        let mut pending = begin_mutation(&mut state, mutation, Utc::now()).unwrap();
        assert_eq!(state.creating, 0);
        assert!(state.cache.entries()[0].completed);

        assert_eq!(finish_mutation(&mut state, &mut pending, &Ok(())).unwrap(), None);
        assert!(state.cache.entries()[0].completed);
    }

    #[test]
    fn test_delete_failure_restores_row() {
        let mut state = loaded_state(vec![todo(1, "a", false), todo(2, "b", true)]);

        let mut pending =
            begin_mutation(&mut state, Mutation::Delete { id: 2 }, Utc::now()).unwrap();
        assert_eq!(state.cache.entries().len(), 1);

        finish_mutation(&mut state, &mut pending, &Err("db locked".to_string())).unwrap();
        assert_eq!(state.cache.entries().len(), 2);
        assert_eq!(state.cache.entries()[1].id, EntryId::Confirmed(2));
    }

    #[test]
    fn test_wrong_phase_still_releases_counter_and_marks_stale() {
        let mut state = loaded_state(vec![]);
        let mut pending = begin_mutation(&mut state, create("x"), Utc::now()).unwrap();
        pending.confirm().unwrap();

        assert!(finish_mutation(&mut state, &mut pending, &Ok(())).is_err());
        assert_eq!(state.creating, 0);

        let mut idle = PendingMutation::new(create("y"));
        assert!(settle_mutation(&mut state, &mut idle).is_err());
        assert!(state.cache.is_stale());
    }
}
