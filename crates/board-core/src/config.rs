//! Board Configuration
//!
//! Endpoint identifiers and tunables. Every field has a default so a partial
//! JSON override is enough.

use serde::{Deserialize, Serialize};

/// How overlapping status commits are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Distinct tasks may commit concurrently.
    #[default]
    AllowOverlap,
    /// At most one commit in flight across the board.
    Serialize,
}

/// Identifiers of the "Change Issue Status" app on the report server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusUpdateConfig {
    pub app_name: String,
    pub app_id: String,
    pub workspace_id: String,
    pub organization_id: String,
    pub user_id: String,
    pub next_group_name: String,
    pub workflow_action: String,
}

impl Default for StatusUpdateConfig {
    fn default() -> Self {
        Self {
            app_name: "Change Issue Status".to_string(),
            app_id: "01022021-064254831-3920198f-f15c-4ea9-b8f3-22913911c281".to_string(),
            workspace_id: "03012021-192624661-c4d2d235-e371-4983-973f-c82b074f9b21".to_string(),
            organization_id: "29102019-093434548-a4fe41b0-1fd0-489a-ac08-a29b98883143".to_string(),
            user_id: "17062024-181413146-241121e4-6644-481f-a0ea-ddf9e3832575".to_string(),
            next_group_name: "Done".to_string(),
            workflow_action: "Start - Submit".to_string(),
        }
    }
}

/// Workflow-rules data table queried for next statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCheckConfig {
    pub data_table_function_id: String,
    pub data_table_id: String,
}

impl Default for StatusCheckConfig {
    fn default() -> Self {
        Self {
            data_table_function_id: "01022021-064148735-3f601026-cf68-4b03-abd5-ca71c5215f97".to_string(),
            data_table_id: "03012021-220616917-65360d6b-ab63-4cf6-9977-2d6c91e005d8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// API root, without trailing slash.
    pub api_base: String,
    /// Saved view holding the sprint task report.
    pub view_id: String,
    /// Attendance & worklog grid report.
    pub attendance_report_id: String,
    pub task_page_size: usize,
    pub attendance_page_size: usize,
    /// Project id used for status lookups before any task fetch saw one.
    pub fallback_project_id: String,
    pub default_sprint: String,
    pub sprint_history_limit: usize,
    pub search_debounce_ms: u32,
    pub commit_policy: CommitPolicy,
    /// Where the login button sends the user.
    pub login_url: String,
    pub status_update: StatusUpdateConfig,
    pub status_check: StatusCheckConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: "https://homeapi.quixy.com/api".to_string(),
            view_id: "05072022-184836479-5888ab5b-d645-4e86-a937-f2d02d2414c1".to_string(),
            attendance_report_id: "12092025-150408108-76d54cf3-0490-441a-bb2d-77eefd4f9ece".to_string(),
            task_page_size: 100,
            attendance_page_size: 50,
            fallback_project_id: "70".to_string(),
            default_sprint: "DAP - 26".to_string(),
            sprint_history_limit: 10,
            search_debounce_ms: 300,
            commit_policy: CommitPolicy::AllowOverlap,
            login_url: "https://login.microsoftonline.com/common/oauth2/v2.0/authorize".to_string(),
            status_update: StatusUpdateConfig::default(),
            status_check: StatusCheckConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Defaults overlaid with a JSON override. A malformed override is logged
    /// and ignored.
    pub fn with_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<BoardConfig>(raw) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed board config override: {}", e);
                Self::default()
            }
        }
    }

    /// Zero page sizes would never advance pagination.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.task_page_size == 0 {
            self.task_page_size = defaults.task_page_size;
        }
        if self.attendance_page_size == 0 {
            self.attendance_page_size = defaults.attendance_page_size;
        }
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = BoardConfig::with_override(Some(
            r#"{"api_base": "https://example.test/api/", "commit_policy": "serialize"}"#,
        ));
        assert_eq!(config.endpoint("Report/GetViewResult"), "https://example.test/api/Report/GetViewResult");
        assert_eq!(config.commit_policy, CommitPolicy::Serialize);
        assert_eq!(config.task_page_size, 100);
        assert_eq!(config.status_update.app_name, "Change Issue Status");
    }

    #[test]
    fn test_bad_override_falls_back() {
        assert_eq!(BoardConfig::with_override(Some("{not json")), BoardConfig::default());
        assert_eq!(BoardConfig::with_override(None), BoardConfig::default());
    }

    #[test]
    fn test_zero_page_size_is_replaced() {
        let config = BoardConfig::with_override(Some(r#"{"attendance_page_size": 0}"#));
        assert_eq!(config.attendance_page_size, 50);
    }
}
