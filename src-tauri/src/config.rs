//! Application Configuration
//!
//! Resolves where the database and logs live. Each location can be
//! overridden through an environment variable.

use std::path::PathBuf;
use tauri::Manager;

/// Overrides the database file (`:memory:` is accepted)
pub const DB_PATH_ENV: &str = "TODO_DB_PATH";
/// Overrides the log directory
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";

pub const DB_FILE_NAME: &str = "todo.db";
pub const LOG_NAME: &str = "TodoApp";
pub const PROJECT_URL: &str = "https://github.com/1w6ts/todo-tut";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub project_url: String,
}

impl AppConfig {
    /// Build from the platform directories of the running app
    pub fn from_app(app_handle: &tauri::AppHandle) -> Result<Self, String> {
        let data_dir = app_handle
            .path()
            .app_data_dir()
            .map_err(|e| format!("Failed to resolve app data dir: {}", e))?;
        let log_dir = app_handle
            .path()
            .app_log_dir()
            .map_err(|e| format!("Failed to resolve app log dir: {}", e))?;

        Ok(Self::resolve(
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(LOG_DIR_ENV).ok(),
            data_dir,
            log_dir,
        ))
    }

    /// Overrides win over platform defaults; blank overrides are ignored
    pub fn resolve(
        db_override: Option<String>,
        log_override: Option<String>,
        data_dir: PathBuf,
        log_dir: PathBuf,
    ) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty()).map(PathBuf::from);

        Self {
            db_path: non_blank(db_override).unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            log_dir: non_blank(log_override).unwrap_or(log_dir),
            project_url: PROJECT_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_platform_dirs() {
        let config = AppConfig::resolve(None, None, PathBuf::from("/data"), PathBuf::from("/logs"));
        assert_eq!(config.db_path, PathBuf::from("/data/todo.db"));
        assert_eq!(config.log_dir, PathBuf::from("/logs"));
        assert_eq!(config.project_url, PROJECT_URL);
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::resolve(
            Some(":memory:".to_string()),
            Some("/tmp/todo-logs".to_string()),
            PathBuf::from("/data"),
            PathBuf::from("/logs"),
        );
        assert_eq!(config.db_path, PathBuf::from(":memory:"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/todo-logs"));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = AppConfig::resolve(
            Some("  ".to_string()),
            None,
            PathBuf::from("/data"),
            PathBuf::from("/logs"),
        );
        assert_eq!(config.db_path, PathBuf::from("/data/todo.db"));
    }
}
