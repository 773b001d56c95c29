//! App Commands

use super::call_no_args;

/// Open the project homepage in the system browser
pub async fn open_project_page() -> Result<(), String> {
    call_no_args("open_project_page").await
}
