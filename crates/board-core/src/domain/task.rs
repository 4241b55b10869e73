//! Task Entity
//!
//! A work item mirrored from the remote report, shown as a draggable card.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Card identifier: 1-based position in the fetched batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Report row for one issue. Unlisted report columns land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    #[serde(rename = "Issue Id", default, deserialize_with = "lenient_string")]
    pub issue_id: String,
    #[serde(rename = "Summary", default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(rename = "Assignee", default, deserialize_with = "lenient_string")]
    pub assignee: String,
    #[serde(rename = "Issue Type", default, deserialize_with = "lenient_string")]
    pub issue_type: String,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(rename = "Record Id", default, deserialize_with = "lenient_string")]
    pub record_id: String,
    #[serde(rename = "Project Id", default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(rename = "Reporter", default, deserialize_with = "lenient_string")]
    pub reporter: String,
    #[serde(rename = "Estimated Hours", default, deserialize_with = "lenient_string")]
    pub estimated_hours: String,
    #[serde(rename = "Detection Phase", default, deserialize_with = "lenient_string")]
    pub detection_phase: String,
    #[serde(rename = "Status Indicator", default, deserialize_with = "lenient_string")]
    pub status_indicator: String,
    #[serde(rename = "Sprint Name", default, deserialize_with = "lenient_string")]
    pub sprint_name: String,
    #[serde(rename = "Team Member Email Id", default, deserialize_with = "lenient_string")]
    pub team_member_email: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Column the card is drawn in. Equals `row.status` outside a pending move.
    pub column_id: String,
    pub row: TaskRow,
}

impl Task {
    /// Build the card for the `index`-th (0-based) row of a fetched batch.
    pub fn from_row(index: usize, row: TaskRow) -> Self {
        Self {
            id: TaskId(index as u32 + 1),
            column_id: row.status.clone(),
            row,
        }
    }

    pub fn issue_id(&self) -> &str {
        &self.row.issue_id
    }

    /// Text placed on the clipboard by the card's copy button.
    pub fn clipboard_text(&self) -> String {
        format!("{}: {}", self.row.issue_id, self.row.summary)
    }

    /// Move the card and its status field together.
    pub fn set_status(&mut self, status: &str) {
        self.column_id = status.to_string();
        self.row.status = status.to_string();
    }
}

/// Accept strings, numbers, booleans and null for text report columns.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
