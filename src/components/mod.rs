//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod filter_bar;
mod header_buttons;
mod new_item_form;
mod skeleton;
mod toast_host;
mod todo_item;
mod todo_list;

pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use header_buttons::{GithubButton, RefreshButton};
pub use new_item_form::NewItemForm;
pub use skeleton::TodoListSkeleton;
pub use toast_host::ToastHost;
pub use todo_item::{LatestReply, TodoItem};
pub use todo_list::TodoList;
