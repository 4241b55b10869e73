//! UI Components
//!
//! Reusable Leptos components.

mod api_key_input;
mod attendance_page;
mod auth_prompt;
mod error_banner;
mod kanban_board;
mod kanban_column;
mod kanban_filters;
mod notes_editor;
mod task_card;
mod user_badge;

pub use api_key_input::ApiKeyInput;
pub use attendance_page::AttendancePage;
pub use auth_prompt::AuthPrompt;
pub use error_banner::ErrorBanner;
pub use kanban_board::KanbanBoard;
pub use kanban_column::KanbanColumn;
pub use kanban_filters::KanbanFilters;
pub use notes_editor::NotesEditor;
pub use task_card::TaskCard;
pub use user_badge::UserBadge;
