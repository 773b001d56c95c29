//! Todo Entity
//!
//! A single entry of the flat todo list, plus the validated inputs used to
//! create and patch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A persisted todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned, immutable
    pub id: i64,
    /// Trimmed, never empty
    pub content: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Entity for Todo {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validated input for creating a todo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    content: String,
}

impl NewTodo {
    /// Trim `content` and reject it if nothing is left
    pub fn parse(content: &str) -> DomainResult<Self> {
        Ok(Self {
            content: normalize_content(content)?,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub content: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn new(content: Option<String>, completed: Option<bool>) -> Self {
        Self { content, completed }
    }

    /// Validate the patch, trimming `content` when present
    pub fn normalized(self) -> DomainResult<Self> {
        let content = match self.content {
            Some(c) => Some(normalize_content(&c)?),
            None => None,
        };
        Ok(Self {
            content,
            completed: self.completed,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.completed.is_none()
    }
}

fn normalize_content(content: &str) -> DomainResult<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(
            "content must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_trims_content() {
        let draft = NewTodo::parse("  buy milk \n").unwrap();
        assert_eq!(draft.content(), "buy milk");
    }

    #[test]
    fn test_new_todo_rejects_blank_content() {
        for input in ["", "   ", "\t\n"] {
            let err = NewTodo::parse(input).unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
            assert_eq!(err.to_string(), "Invalid input: content must not be empty");
        }
    }

    #[test]
    fn test_patch_normalization() {
        let patch = TodoPatch::new(Some(" v2 ".to_string()), Some(true))
            .normalized()
            .unwrap();
        assert_eq!(patch.content.as_deref(), Some("v2"));
        assert_eq!(patch.completed, Some(true));

        let only_flag = TodoPatch::new(None, Some(false)).normalized().unwrap();
        assert!(only_flag.content.is_none());
        assert!(!only_flag.is_empty());

        assert!(TodoPatch::new(Some("  ".to_string()), None).normalized().is_err());
        assert!(TodoPatch::default().is_empty());
    }

    #[test]
    fn test_todo_serializes_camel_case() {
        let now = Utc::now();
        let todo = Todo {
            id: 7,
            content: "Write spec".to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["content"], "Write spec");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());

        let back: Todo = serde_json::from_value(json).unwrap();
        assert_eq!(back, todo);
    }
}
