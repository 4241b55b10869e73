//! Preference Repository
//!
//! Typed accessors for everything the board keeps between sessions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::traits::KeyValueStore;
use crate::config::BoardConfig;
use crate::domain::{AttendanceRecord, BookmarkState, Bookmarks, DateRange, ReportType};
use crate::error::{StoreError, StoreResult};

pub const SPRINT_NAME_KEY: &str = "kanban_sprint_name";
pub const SPRINT_HISTORY_KEY: &str = "kanban_sprint_name_history";
pub const SEARCH_VALUE_KEY: &str = "kanban_search_value";
pub const BOOKMARKS_KEY: &str = "taskBookmarks";
pub const NOTES_KEY: &str = "userNotes";
pub const API_KEY_KEY: &str = "kanban_user_api_key";
pub const CONFIG_KEY: &str = "kanban_config";
pub const ATTENDANCE_COLUMNS_KEY: &str = "attendance_visible_columns";
pub const ATTENDANCE_REPORT_TYPE_KEY: &str = "attendance_report_type";
pub const ATTENDANCE_RANGE_KEY: &str = "attendance_date_range";
pub const ATTENDANCE_CACHE_KEY: &str = "attendance_cached_rows";

/// Attendance rows together with the range that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAttendance {
    pub range: DateRange,
    pub rows: Vec<AttendanceRecord>,
}

/// Preference repository over any key-value backend.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    store: S,
    default_sprint: String,
    history_limit: usize,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S, config: &BoardConfig) -> Self {
        Self {
            store,
            default_sprint: config.default_sprint.clone(),
            history_limit: config.sprint_history_limit.max(1),
        }
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    // ========================
    // Sprint
    // ========================

    pub fn sprint_name(&self) -> String {
        self.store
            .get(SPRINT_NAME_KEY)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.default_sprint.clone())
    }

    pub fn set_sprint_name(&self, sprint: &str) -> StoreResult<()> {
        self.store.set(SPRINT_NAME_KEY, sprint)
    }

    /// Most-recent-first list of sprint names used before.
    pub fn sprint_history(&self) -> Vec<String> {
        self.read_json(SPRINT_HISTORY_KEY)
            .unwrap_or_else(|| vec![self.default_sprint.clone()])
    }

    /// Move `sprint` to the front of the history, dropping duplicates and
    /// anything past the limit. Blank names are ignored.
    pub fn remember_sprint(&self, sprint: &str) -> StoreResult<Vec<String>> {
        if sprint.trim().is_empty() {
            return Ok(self.sprint_history());
        }
        let mut history: Vec<String> = self
            .sprint_history()
            .into_iter()
            .filter(|name| name != sprint)
            .collect();
        history.insert(0, sprint.to_string());
        history.truncate(self.history_limit);
        self.write_json(SPRINT_HISTORY_KEY, &history)?;
        Ok(history)
    }

    // ========================
    // Search & notes
    // ========================

    pub fn search_text(&self) -> String {
        self.store.get(SEARCH_VALUE_KEY).unwrap_or_default()
    }

    pub fn set_search_text(&self, text: &str) -> StoreResult<()> {
        self.store.set(SEARCH_VALUE_KEY, text)
    }

    pub fn notes(&self) -> String {
        self.store.get(NOTES_KEY).unwrap_or_default()
    }

    pub fn set_notes(&self, notes: &str) -> StoreResult<()> {
        self.store.set(NOTES_KEY, notes)
    }

    // ========================
    // Bookmarks
    // ========================

    pub fn bookmarks(&self) -> Bookmarks {
        self.read_json(BOOKMARKS_KEY).unwrap_or_default()
    }

    pub fn save_bookmarks(&self, bookmarks: &Bookmarks) -> StoreResult<()> {
        self.write_json(BOOKMARKS_KEY, bookmarks)
    }

    /// Advance and persist the bookmark of one issue.
    pub fn cycle_bookmark(&self, issue_id: &str) -> StoreResult<BookmarkState> {
        if issue_id.is_empty() {
            return Err(StoreError::InvalidInput("bookmark needs an issue id".to_string()));
        }
        let mut bookmarks = self.bookmarks();
        let state = bookmarks.cycle(issue_id);
        self.save_bookmarks(&bookmarks)?;
        Ok(state)
    }

    // ========================
    // API key
    // ========================

    pub fn api_key(&self) -> Option<String> {
        self.store
            .get(API_KEY_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    pub fn save_api_key(&self, key: &str) -> StoreResult<()> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidInput("API key cannot be empty".to_string()));
        }
        self.store.set(API_KEY_KEY, trimmed)
    }

    pub fn clear_api_key(&self) -> StoreResult<()> {
        self.store.remove(API_KEY_KEY)
    }

    pub fn config_override(&self) -> Option<String> {
        self.store.get(CONFIG_KEY)
    }

    // ========================
    // Attendance
    // ========================

    /// Visible attendance column keys; `None` means all columns.
    pub fn attendance_columns(&self) -> Option<Vec<String>> {
        self.read_json(ATTENDANCE_COLUMNS_KEY)
    }

    pub fn set_attendance_columns(&self, keys: &[String]) -> StoreResult<()> {
        self.write_json(ATTENDANCE_COLUMNS_KEY, &keys)
    }

    pub fn report_type(&self) -> ReportType {
        self.read_json(ATTENDANCE_REPORT_TYPE_KEY).unwrap_or_default()
    }

    pub fn set_report_type(&self, report_type: ReportType) -> StoreResult<()> {
        self.write_json(ATTENDANCE_REPORT_TYPE_KEY, &report_type)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.read_json(ATTENDANCE_RANGE_KEY)
    }

    pub fn set_date_range(&self, range: &DateRange) -> StoreResult<()> {
        self.write_json(ATTENDANCE_RANGE_KEY, range)
    }

    pub fn cached_attendance(&self) -> Option<CachedAttendance> {
        self.read_json(ATTENDANCE_CACHE_KEY)
    }

    /// Cached rows, only when they were fetched for exactly `range`.
    pub fn cached_attendance_for(&self, range: &DateRange) -> Option<Vec<AttendanceRecord>> {
        self.cached_attendance()
            .filter(|cached| cached.range == *range)
            .map(|cached| cached.rows)
    }

    pub fn cache_attendance(&self, range: DateRange, rows: &[AttendanceRecord]) -> StoreResult<()> {
        let cached = CachedAttendance { range, rows: rows.to_vec() };
        self.write_json(ATTENDANCE_CACHE_KEY, &cached)
    }

    // ========================
    // JSON helpers
    // ========================

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed stored value for {}: {}", key, e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(key, &raw)
    }
}
