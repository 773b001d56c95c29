//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod app_cmd;
mod todo_cmd;

pub use app_cmd::*;
pub use todo_cmd::*;
