//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no dependencies beyond serde, chrono and the error types.

mod entity;
mod todo;

pub use entity::{DomainError, DomainResult, Entity};
pub use todo::{NewTodo, Todo, TodoPatch};
