//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl DbState {
    /// Shared handle to the connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open the database at `db_path` (or in memory) and run migrations
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = if db_path.as_os_str() == IN_MEMORY {
        Connection::open_in_memory()?
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Internal(format!("Failed to create db dir: {}", e)))?;
        }
        let conn = Connection::open(db_path)?;
        let mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        log::debug!("journal_mode = {}", mode);
        conn
    };

    run_migrations(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
        path: db_path.to_path_buf(),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
        [],
    )?;

    // Databases created before updated_at existed
    if !column_exists(conn, "todos", "updated_at")? {
        conn.execute(
            "ALTER TABLE todos ADD COLUMN updated_at TEXT NOT NULL
                DEFAULT '1970-01-01T00:00:00.000Z'",
            [],
        )?;
        conn.execute("UPDATE todos SET updated_at = created_at", [])?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at)",
        [],
    )?;

    Ok(())
}
