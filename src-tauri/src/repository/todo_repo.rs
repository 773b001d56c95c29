//! Todo Repository Implementation
//!
//! SQLite-backed implementation of Repository<Todo>.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainResult, NewTodo, Todo, TodoPatch};
use super::traits::Repository;

const COLUMNS: &str = "id, content, completed, created_at, updated_at";

/// SQLite implementation of Todo repository
#[derive(Clone)]
pub struct TodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TodoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// (completed, total)
    pub async fn count(&self) -> DomainResult<(u32, u32)> {
        let conn = self.conn.lock().await;
        let counts = conn.query_row(
            "SELECT COALESCE(SUM(completed), 0), COUNT(*) FROM todos",
            [],
            |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)),
        )?;
        Ok(counts)
    }
}

#[async_trait]
impl Repository<Todo> for TodoRepository {
    type Draft = NewTodo;
    type Patch = TodoPatch;

    async fn create(&self, draft: &NewTodo) -> DomainResult<Todo> {
        let conn = self.conn.lock().await;
        let now = timestamp(Utc::now());

        let todo = conn.query_row(
            &format!(
                "INSERT INTO todos (content, completed, created_at, updated_at)
                 VALUES (?1, 0, ?2, ?2)
                 RETURNING {}",
                COLUMNS
            ),
            params![draft.content(), now],
            row_to_todo,
        )?;
        Ok(todo)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;

        let todo = conn
            .query_row(
                &format!("SELECT {} FROM todos WHERE id = ?1", COLUMNS),
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    async fn list(&self) -> DomainResult<Vec<Todo>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM todos ORDER BY created_at ASC, id ASC",
            COLUMNS
        ))?;
        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;
        let now = timestamp(Utc::now());

        let todo = conn
            .query_row(
                &format!(
                    "UPDATE todos SET
                        content = COALESCE(?1, content),
                        completed = COALESCE(?2, completed),
                        updated_at = ?3
                     WHERE id = ?4
                     RETURNING {}",
                    COLUMNS
                ),
                params![patch.content, patch.completed, now, id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> DomainResult<Option<Todo>> {
        let conn = self.conn.lock().await;

        let todo = conn
            .query_row(
                &format!("DELETE FROM todos WHERE id = ?1 RETURNING {}", COLUMNS),
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }
}

/// Fixed-width RFC 3339 so text order matches time order
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Convert a database row to Todo
fn row_to_todo(row: &Row) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        content: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        created_at: parse_timestamp(row, 3)?,
        updated_at: parse_timestamp(row, 4)?,
    })
}
