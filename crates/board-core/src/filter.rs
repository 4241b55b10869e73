//! Board Filtering
//!
//! Issue type, assignee, bookmark and free-text predicates, ANDed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{BookmarkFilter, Bookmarks, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    /// Empty means every issue type.
    pub issue_types: BTreeSet<String>,
    /// Empty means every assignee.
    pub assignees: BTreeSet<String>,
    pub bookmark: BookmarkFilter,
    pub search: String,
}

impl BoardFilter {
    pub fn with_search(search: impl Into<String>) -> Self {
        Self { search: search.into(), ..Self::default() }
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.issue_types.is_empty()
            || !self.assignees.is_empty()
            || self.bookmark.is_active()
    }

    pub fn matches(&self, task: &Task, bookmarks: &Bookmarks) -> bool {
        let row = &task.row;
        (self.issue_types.is_empty() || self.issue_types.contains(&row.issue_type))
            && (self.assignees.is_empty() || self.assignees.contains(&row.assignee))
            && self.bookmark.matches(bookmarks.get(&row.issue_id))
            && matches_search(task, &self.search)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task], bookmarks: &Bookmarks) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t, bookmarks)).collect()
    }

    pub fn toggle_issue_type(&mut self, issue_type: &str) {
        toggle(&mut self.issue_types, issue_type);
    }

    pub fn toggle_assignee(&mut self, assignee: &str) {
        toggle(&mut self.assignees, assignee);
    }

    /// "Select all": everything when not everything is selected, else nothing.
    pub fn select_all_issue_types(&mut self, available: &[String]) {
        select_all(&mut self.issue_types, available);
    }

    pub fn select_all_assignees(&mut self, available: &[String]) {
        select_all(&mut self.assignees, available);
    }

    /// Toolbar counter text.
    pub fn count_label(&self, filtered: usize, total: usize) -> String {
        if self.is_active() {
            format!("Filtered Tasks: {} of {}", filtered, total)
        } else {
            format!("Total Tasks: {}", filtered)
        }
    }
}

/// Trimmed, case-insensitive substring over issue id, summary and assignee.
pub fn matches_search(task: &Task, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let row = &task.row;
    [&row.issue_id, &row.summary, &row.assignee]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Assignee dropdown narrowing.
pub fn narrow_options<'a>(options: &'a [String], query: &str) -> Vec<&'a String> {
    let query = query.to_lowercase();
    options
        .iter()
        .filter(|o| o.to_lowercase().contains(&query))
        .collect()
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

fn select_all(set: &mut BTreeSet<String>, available: &[String]) {
    if set.len() == available.len() {
        set.clear();
    } else {
        *set = available.iter().cloned().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookmarkState, TaskRow};

    fn task(index: usize, issue: &str, summary: &str, assignee: &str, issue_type: &str) -> Task {
        Task::from_row(index, TaskRow {
            issue_id: issue.into(),
            summary: summary.into(),
            assignee: assignee.into(),
            issue_type: issue_type.into(),
            status: "New".into(),
            ..Default::default()
        })
    }

    fn sample() -> Vec<Task> {
        vec![
            task(0, "DAP-1", "Fix login", "John Smith", "Story"),
            task(1, "DAP-2", "Report export", "Asha Rao", "Defect"),
            task(2, "DAP-3", "Smoke tests", "Lee Wong", "Story"),
        ]
    }

    #[test]
    fn test_empty_filter_is_neutral() {
        let tasks = sample();
        let filter = BoardFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&tasks, &Bookmarks::default()).len(), tasks.len());
    }

    #[test]
    fn test_search_case_insensitive_across_fields() {
        let tasks = sample();
        let marks = Bookmarks::default();
        let found = BoardFilter::with_search("  smi ").apply(&tasks, &marks);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].issue_id(), "DAP-1");

        assert_eq!(BoardFilter::with_search("SMO").apply(&tasks, &marks).len(), 1);
        assert_eq!(BoardFilter::with_search("dap-").apply(&tasks, &marks).len(), 3);
        assert_eq!(BoardFilter::with_search("   ").apply(&tasks, &marks).len(), 3);
    }

    #[test]
    fn test_predicates_are_anded() {
        let tasks = sample();
        let mut marks = Bookmarks::default();
        marks.set("DAP-3", BookmarkState::Starred);

        let mut filter = BoardFilter::default();
        filter.toggle_issue_type("Story");
        assert_eq!(filter.apply(&tasks, &marks).len(), 2);

        filter.bookmark = BookmarkFilter::Only(BookmarkState::Starred);
        let found = filter.apply(&tasks, &marks);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].issue_id(), "DAP-3");

        filter.toggle_assignee("Asha Rao");
        assert!(filter.apply(&tasks, &marks).is_empty());
    }

    #[test]
    fn test_select_all_toggles() {
        let available = vec!["Defect".to_string(), "Story".to_string()];
        let mut filter = BoardFilter::default();
        filter.select_all_issue_types(&available);
        assert_eq!(filter.issue_types.len(), 2);
        filter.select_all_issue_types(&available);
        assert!(filter.issue_types.is_empty());
    }

    #[test]
    fn test_count_label() {
        let mut filter = BoardFilter::default();
        assert_eq!(filter.count_label(3, 3), "Total Tasks: 3");
        filter.bookmark = BookmarkFilter::All.next();
        assert_eq!(filter.count_label(1, 3), "Filtered Tasks: 1 of 3");
    }

    #[test]
    fn test_narrow_options() {
        let options = vec!["Asha Rao".to_string(), "John Smith".to_string()];
        assert_eq!(narrow_options(&options, "SMI"), vec![&options[1]]);
        assert_eq!(narrow_options(&options, "").len(), 2);
    }
}
