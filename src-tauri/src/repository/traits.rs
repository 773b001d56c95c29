//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type. `Draft` is the validated creation input and
/// `Patch` the validated partial update. Update and delete report a missing id
/// as `Ok(None)` rather than an error.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    type Draft: Send + Sync;
    type Patch: Send + Sync;

    /// Create a new entity
    async fn create(&self, draft: &Self::Draft) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Apply a partial update, returning the stored result
    async fn update(&self, id: T::Id, patch: &Self::Patch) -> DomainResult<Option<T>>;

    /// Delete entity by ID, returning what was removed
    async fn delete(&self, id: T::Id) -> DomainResult<Option<T>>;
}
