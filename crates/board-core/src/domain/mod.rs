//! Domain Layer
//!
//! Board entities and their ordering rules. No I/O lives here.

mod attendance;
mod bookmark;
mod column;
mod project;
mod status;
mod task;

pub use attendance::{AttendanceRecord, DateRange, ReportType, ATTENDANCE_COLUMNS};
pub use bookmark::{BookmarkFilter, BookmarkState, Bookmarks};
pub use column::{derive_columns, insert_column, Column};
pub use project::ProjectContext;
pub use status::{is_known_status, status_rank, OTHER_STATUS, STATUS_ORDER};
pub use task::{Task, TaskId, TaskRow};
