//! App-level commands

use tauri::State;
use crate::AppState;

/// Open the project homepage in the default browser
#[tauri::command]
pub fn open_project_page(state: State<'_, AppState>) -> Result<(), String> {
    open::that(&state.config.project_url).map_err(|e| {
        log::warn!("failed to open {}: {}", state.config.project_url, e);
        e.to_string()
    })
}
