//! Column Entity
//!
//! Board lanes derived from task statuses.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::status::{is_known_status, status_rank, OTHER_STATUS};
use super::task::Task;

/// A Kanban lane keyed by status name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub highlighted: bool,
}

impl Column {
    pub fn new(status: &str) -> Self {
        Self {
            id: status.to_string(),
            title: status.to_string(),
            highlighted: false,
        }
    }

    pub fn is_other(&self) -> bool {
        self.id == OTHER_STATUS
    }
}

/// Columns for a freshly fetched batch: every known status in use, plus the
/// `Other Status` bucket, in status order.
pub fn derive_columns(tasks: &[Task]) -> Vec<Column> {
    let statuses: BTreeSet<&str> = tasks
        .iter()
        .map(|t| t.row.status.as_str())
        .filter(|s| is_known_status(s) && *s != OTHER_STATUS)
        .collect();

    let mut columns: Vec<Column> = statuses.into_iter().map(Column::new).collect();
    columns.push(Column::new(OTHER_STATUS));
    columns.sort_by_key(|c| status_rank(&c.id));
    columns
}

/// Insert a column for `status` at its status-order position.
///
/// Lands before the first column that ranks strictly higher, so repeated
/// unknown statuses keep insertion order ahead of `Other Status`.
/// Returns false if the column already exists.
pub fn insert_column(columns: &mut Vec<Column>, status: &str) -> bool {
    if columns.iter().any(|c| c.id == status) {
        return false;
    }
    let rank = status_rank(status);
    let index = columns
        .iter()
        .position(|c| rank < status_rank(&c.id))
        .unwrap_or(columns.len());
    columns.insert(index, Column::new(status));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskRow;

    fn task(index: usize, status: &str) -> Task {
        Task::from_row(index, TaskRow { status: status.into(), ..Default::default() })
    }

    fn ids(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_derive_columns_orders_and_appends_other() {
        let tasks = vec![task(0, "Coding"), task(1, "New"), task(2, "Coding"), task(3, "Blocked")];
        let columns = derive_columns(&tasks);
        assert_eq!(ids(&columns), vec!["New", "Coding", OTHER_STATUS]);
    }

    #[test]
    fn test_derive_columns_empty_batch_has_other_only() {
        assert_eq!(ids(&derive_columns(&[])), vec![OTHER_STATUS]);
    }

    #[test]
    fn test_insert_known_status_in_order() {
        let mut columns = derive_columns(&[task(0, "New"), task(1, "Closed")]);
        assert!(insert_column(&mut columns, "Coding"));
        assert_eq!(ids(&columns), vec!["New", "Coding", "Closed", OTHER_STATUS]);
    }

    #[test]
    fn test_insert_unknown_before_other() {
        let mut columns = derive_columns(&[task(0, "Release")]);
        insert_column(&mut columns, "Parked");
        insert_column(&mut columns, "Waiting");
        assert_eq!(ids(&columns), vec!["Release", "Parked", "Waiting", OTHER_STATUS]);
    }

    #[test]
    fn test_insert_existing_is_noop() {
        let mut columns = derive_columns(&[task(0, "New")]);
        assert!(!insert_column(&mut columns, "New"));
        assert_eq!(columns.len(), 2);
    }
}
