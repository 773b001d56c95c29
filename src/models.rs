//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Todo data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update sent with `update_todo`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            content: None,
            completed: Some(completed),
        }
    }
}
