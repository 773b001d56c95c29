//! Tauri Commands for Todo CRUD
//!
//! Exposes the todo store to the frontend via Tauri IPC. Every command
//! validates its input before the store is touched; a missing id is not an
//! error and comes back as `None`.

use tauri::State;
use crate::domain::{NewTodo, Todo, TodoPatch};
use crate::repository::Repository;
use crate::AppState;

/// List all todos, oldest first
#[tauri::command]
pub async fn list_todos(state: State<'_, AppState>) -> Result<Vec<Todo>, String> {
    state.todo_repo.list().await.map_err(|e| {
        log::error!("list_todos failed: {}", e);
        e.to_string()
    })
}

/// Get todo by ID
#[tauri::command]
pub async fn get_todo_by_id(state: State<'_, AppState>, id: i64) -> Result<Option<Todo>, String> {
    state.todo_repo.find_by_id(id).await.map_err(|e| e.to_string())
}

/// Create a new todo
#[tauri::command]
pub async fn create_todo(state: State<'_, AppState>, content: String) -> Result<Todo, String> {
    let draft = NewTodo::parse(&content).map_err(|e| {
        log::warn!("create_todo rejected: {}", e);
        e.to_string()
    })?;

    let todo = state.todo_repo.create(&draft).await.map_err(|e| {
        log::error!("create_todo failed: {}", e);
        e.to_string()
    })?;
    log::info!("created todo {}", todo.id);
    Ok(todo)
}

/// Update content and/or completion
#[tauri::command]
pub async fn update_todo(
    state: State<'_, AppState>,
    id: i64,
    content: Option<String>,
    completed: Option<bool>,
) -> Result<Option<Todo>, String> {
    let patch = TodoPatch::new(content, completed).normalized().map_err(|e| {
        log::warn!("update_todo {} rejected: {}", id, e);
        e.to_string()
    })?;
    if patch.is_empty() {
        log::debug!("update_todo {}: empty patch, only touching updated_at", id);
    }

    let updated = state.todo_repo.update(id, &patch).await.map_err(|e| {
        log::error!("update_todo {} failed: {}", id, e);
        e.to_string()
    })?;
    if updated.is_none() {
        log::debug!("update_todo: no todo with id {}", id);
    }
    Ok(updated)
}

/// Delete todo
#[tauri::command]
pub async fn delete_todo(state: State<'_, AppState>, id: i64) -> Result<Option<Todo>, String> {
    let deleted = state.todo_repo.delete(id).await.map_err(|e| {
        log::error!("delete_todo {} failed: {}", id, e);
        e.to_string()
    })?;
    if deleted.is_some() {
        log::info!("deleted todo {}", id);
    }
    Ok(deleted)
}
