//! Global UI State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every board
//! mutation goes through the helpers below.

use board_core::attendance::AttendanceSearch;
use board_core::domain::{BookmarkState, Bookmarks, Task, TaskId};
use board_core::error::ReportResult;
use board_core::workflow::CommitRequest;
use board_core::{BoardConfig, BoardFilter, BoardState, DropOutcome, DropTarget, Settlement, TaskBatch, TransitionWorkflow};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::storage::Preferences;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tasks. Please try again later.";

/// Global UI state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Tasks, columns and their markers
    pub board: BoardState,
    pub filters: BoardFilter,
    pub workflow: TransitionWorkflow,
    pub bookmarks: Bookmarks,
    /// A task fetch is running
    pub loading: bool,
    /// Dismissible error banner
    pub banner: Option<String>,
    /// Login prompt after a status change needed a session
    pub auth_prompt: bool,
    pub attendance: AttendanceSearch,
    pub attendance_error: Option<String>,
}

impl UiState {
    pub fn new(prefs: &Preferences, config: &BoardConfig) -> Self {
        Self {
            filters: BoardFilter::with_search(prefs.search_text()),
            workflow: TransitionWorkflow::new(config.commit_policy),
            bookmarks: prefs.bookmarks(),
            attendance: AttendanceSearch::restore(prefs),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the board with a fetched batch
pub fn store_replace_tasks(store: &UiStore, batch: TaskBatch) {
    store.update(|state| {
        state.workflow.cancel_drag(&mut state.board);
        state.board.replace_tasks(batch);
    });
}

/// Tasks passing the current filters, in board order
pub fn store_filtered_tasks(store: &UiStore) -> Vec<Task> {
    store.with(|state| {
        state
            .filters
            .apply(&state.board.tasks, &state.bookmarks)
            .into_iter()
            .cloned()
            .collect()
    })
}

pub fn store_begin_drag(store: &UiStore, task: TaskId) -> bool {
    store
        .try_update(|state| state.workflow.begin_drag(&mut state.board, task))
        .unwrap_or(false)
}

pub fn store_hover(store: &UiStore, over: &DropTarget) {
    store.update(|state| {
        state.workflow.hover(&mut state.board, over);
    });
}

pub fn store_release(store: &UiStore, target: Option<&DropTarget>) -> DropOutcome {
    store
        .try_update(|state| state.workflow.release(&mut state.board, target))
        .unwrap_or(DropOutcome::Discarded)
}

/// Apply a commit result and raise the login prompt or banner it calls for
pub fn store_settle<T>(store: &UiStore, request: &CommitRequest, result: ReportResult<T>) -> Option<Settlement> {
    store.try_update(|state| {
        let settlement = state.workflow.settle(&mut state.board, request, result);
        if settlement.needs_login() {
            state.auth_prompt = true;
        } else if let Some(message) = settlement.banner_message() {
            state.banner = Some(message);
        }
        settlement
    })
}

pub fn store_apply_status_lookup(store: &UiStore, task: TaskId, statuses: &[String]) {
    store.board().write().apply_status_lookup(task, statuses);
}

pub fn store_clear_highlighting(store: &UiStore) {
    store.board().write().clear_highlighting();
}

pub fn store_set_bookmark(store: &UiStore, issue_id: &str, state: BookmarkState) {
    store.bookmarks().write().set(issue_id, state);
}

pub fn store_show_error(store: &UiStore, message: impl Into<String>) {
    *store.banner().write() = Some(message.into());
}

/// Dismissing the banner also drops the markers of the finished transition
pub fn store_dismiss_banner(store: &UiStore) {
    store.update(|state| {
        state.banner = None;
        state.board.clear_highlighting();
    });
}
