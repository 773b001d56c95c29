//! Todo Commands
//!
//! Frontend bindings for the todo procedures.

use serde::Serialize;
use crate::models::{Todo, TodoPatch};
use super::{call, call_no_args};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct IdArgs {
    id: i64,
}

#[derive(Serialize)]
struct CreateTodoArgs<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct UpdateTodoArgs<'a> {
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

// ========================
// Commands
// ========================

pub async fn list_todos() -> Result<Vec<Todo>, String> {
    call_no_args("list_todos").await
}

pub async fn get_todo_by_id(id: i64) -> Result<Option<Todo>, String> {
    call("get_todo_by_id", &IdArgs { id }).await
}

pub async fn create_todo(content: &str) -> Result<Todo, String> {
    call("create_todo", &CreateTodoArgs { content }).await
}

pub async fn update_todo(id: i64, patch: &TodoPatch) -> Result<Option<Todo>, String> {
    let args = UpdateTodoArgs {
        id,
        content: patch.content.as_deref(),
        completed: patch.completed,
    };
    call("update_todo", &args).await
}

pub async fn delete_todo(id: i64) -> Result<Option<Todo>, String> {
    call("delete_todo", &IdArgs { id }).await
}
