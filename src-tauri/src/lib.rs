//! Todo App Backend
//!
//! Layered architecture:
//! - domain: Core entities and validation
//! - repository: Data access abstractions and the SQLite implementation
//! - commands: Tauri command handlers

use tauri::Manager;

mod commands;
mod config;
mod domain;
mod repository;

use config::AppConfig;
use repository::{init_db, TodoRepository};

/// Application state shared across commands
pub struct AppState {
    pub todo_repo: TodoRepository,
    pub config: AppConfig,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let config = AppConfig::from_app(app.handle())?;

            if let Err(e) = rolling_logger::init_logger(&config.log_dir, config::LOG_NAME) {
                let now = chrono::Local::now().format("%H:%M:%S%.3f");
                eprintln!("[{}] logger init failed: {}", now, e);
            }

            log::info!("opening database at {}", config.db_path.display());
            let db_state = tauri::async_runtime::block_on(init_db(&config.db_path)).map_err(|e| {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                e
            })?;

            log::info!("database ready at {}", db_state.path().display());
            let todo_repo = TodoRepository::new(db_state.connection());
            match tauri::async_runtime::block_on(todo_repo.count()) {
                Ok((done, total)) => log::info!("{} todos loaded, {} completed", total, done),
                Err(e) => log::warn!("could not count todos: {}", e),
            }

            app.manage(AppState { todo_repo, config });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_todos,
            commands::get_todo_by_id,
            commands::create_todo,
            commands::update_todo,
            commands::delete_todo,
            commands::open_project_page,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
