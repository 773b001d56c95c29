//! Client Data Cache
//!
//! Local copy of the todo list, fed by list fetches and by optimistic
//! mutation effects. A mutation cancels the in-flight fetch, snapshots the
//! list, applies its expected effect, and later either keeps it or restores
//! the snapshot wholesale. Settling marks the list stale so a refetch
//! reconciles it with the backend.
//!
//! Unconfirmed creations carry `EntryId::Pending` and are never sent to the
//! backend; the refetch after settlement replaces them with confirmed rows.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Todo, TodoPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Client-side placeholder for an unconfirmed create
    Pending(u32),
    /// Server-assigned id
    Confirmed(i64),
}

impl EntryId {
    pub fn server_id(self) -> Option<i64> {
        match self {
            EntryId::Confirmed(id) => Some(id),
            EntryId::Pending(_) => None,
        }
    }
}

/// One row of the cached list
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTodo {
    pub id: EntryId,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CachedTodo {
    pub fn is_pending(&self) -> bool {
        matches!(self.id, EntryId::Pending(_))
    }
}

impl From<Todo> for CachedTodo {
    fn from(todo: Todo) -> Self {
        Self {
            id: EntryId::Confirmed(todo.id),
            content: todo.content,
            completed: todo.completed,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// No list has been loaded yet
    #[default]
    Loading,
    Ready,
    /// The first load failed
    Failed(String),
}

/// Identifies one list fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// The list as it was right before an optimistic change
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(Option<Vec<CachedTodo>>);

/// A change requested by the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { content: String },
    Update { id: i64, patch: TodoPatch },
    Delete { id: i64 },
}

impl Mutation {
    pub fn is_create(&self) -> bool {
        matches!(self, Mutation::Create { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoCache {
    entries: Option<Vec<CachedTodo>>,
    status: QueryStatus,
    stale: bool,
    last_ticket: u64,
    in_flight: Option<u64>,
    next_pending: u32,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached rows in display order; empty until the first load
    pub fn entries(&self) -> &[CachedTodo] {
        self.entries.as_deref().unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a list fetch; a newer fetch supersedes any older one
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        self.in_flight = Some(self.last_ticket);
        if self.entries.is_none() {
            self.status = QueryStatus::Loading;
        }
        FetchTicket(self.last_ticket)
    }

    /// Apply a fetch result. Returns false if the fetch was canceled or
    /// superseded, in which case the cache is untouched.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Todo>, String>,
    ) -> bool {
        if self.in_flight != Some(ticket.0) {
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(todos) => {
                self.entries = Some(todos.into_iter().map(CachedTodo::from).collect());
                self.status = QueryStatus::Ready;
                self.stale = false;
            }
            Err(message) => {
                // A failed refresh keeps whatever is already shown
                if self.entries.is_none() {
                    self.status = QueryStatus::Failed(message);
                }
            }
        }
        true
    }

    /// Drop the in-flight fetch so its late result is ignored
    pub fn cancel_fetches(&mut self) {
        self.in_flight = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.entries.clone())
    }

    /// Cancel fetches, snapshot, then apply the expected effect of `mutation`
    pub fn apply_optimistic(&mut self, mutation: &Mutation, now: DateTime<Utc>) -> Snapshot {
        self.cancel_fetches();
        let snapshot = self.snapshot();

        match mutation {
            Mutation::Create { content } => {
                self.next_pending += 1;
                let entry = CachedTodo {
                    id: EntryId::Pending(self.next_pending),
                    content: content.clone(),
                    completed: false,
                    created_at: now,
                    updated_at: now,
                };
                self.entries.get_or_insert_with(Vec::new).push(entry);
            }
            Mutation::Update { id, patch } => {
                if let Some(entry) = self.find_mut(*id) {
                    if let Some(content) = &patch.content {
                        entry.content = content.clone();
                    }
                    if let Some(completed) = patch.completed {
                        entry.completed = completed;
                    }
                    entry.updated_at = now;
                }
            }
            Mutation::Delete { id } => {
                if let Some(entries) = self.entries.as_mut() {
                    entries.retain(|e| e.id != EntryId::Confirmed(*id));
                }
            }
        }

        snapshot
    }

    /// Restore the list captured before an optimistic change
    pub fn rollback(&mut self, snapshot: Snapshot) {
        self.entries = snapshot.0;
    }

    /// Mark the list stale; the caller is expected to refetch
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut CachedTodo> {
        self.entries
            .as_mut()?
            .iter_mut()
            .find(|e| e.id == EntryId::Confirmed(id))
    }
}

/// Lifecycle of a single mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    OptimisticApplied,
    Confirmed,
    RolledBack,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} a mutation in phase {from:?}")]
pub struct PhaseError {
    pub from: MutationPhase,
    pub action: &'static str,
}

/// A mutation together with the snapshot it may roll back to.
///
/// `Idle -> OptimisticApplied -> (Confirmed | RolledBack) -> Settled`
#[derive(Debug, Clone)]
pub struct PendingMutation {
    mutation: Mutation,
    phase: MutationPhase,
    snapshot: Option<Snapshot>,
}

impl PendingMutation {
    pub fn new(mutation: Mutation) -> Self {
        Self {
            mutation,
            phase: MutationPhase::Idle,
            snapshot: None,
        }
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    #[cfg(test)]
    pub fn phase(&self) -> MutationPhase {
        self.phase
    }

    fn expect(&self, phases: &[MutationPhase], action: &'static str) -> Result<(), PhaseError> {
        if phases.contains(&self.phase) {
            Ok(())
        } else {
            Err(PhaseError { from: self.phase, action })
        }
    }

    pub fn apply(&mut self, cache: &mut TodoCache, now: DateTime<Utc>) -> Result<(), PhaseError> {
        self.expect(&[MutationPhase::Idle], "apply")?;
        self.snapshot = Some(cache.apply_optimistic(&self.mutation, now));
        self.phase = MutationPhase::OptimisticApplied;
        Ok(())
    }

    /// The backend accepted the mutation; the optimistic effect stays
    pub fn confirm(&mut self) -> Result<(), PhaseError> {
        self.expect(&[MutationPhase::OptimisticApplied], "confirm")?;
        self.snapshot = None;
        self.phase = MutationPhase::Confirmed;
        Ok(())
    }

    /// The backend rejected the mutation; restore this mutation's snapshot
    pub fn fail(&mut self, cache: &mut TodoCache) -> Result<(), PhaseError> {
        self.expect(&[MutationPhase::OptimisticApplied], "roll back")?;
        if let Some(snapshot) = self.snapshot.take() {
            cache.rollback(snapshot);
        }
        self.phase = MutationPhase::RolledBack;
        Ok(())
    }

    /// Outcome known; mark the list stale for a refetch
    pub fn settle(&mut self, cache: &mut TodoCache) -> Result<(), PhaseError> {
        self.expect(&[MutationPhase::Confirmed, MutationPhase::RolledBack], "settle")?;
        cache.invalidate();
        self.phase = MutationPhase::Settled;
        Ok(())
    }
}
