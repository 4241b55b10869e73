//! Board State
//!
//! Tasks, columns and the per-task markers the cards render with.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::client::TaskBatch;
use crate::domain::{derive_columns, insert_column, Column, ProjectContext, Task, TaskId, OTHER_STATUS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub columns: Vec<Column>,
    /// Task whose next statuses are currently highlighted (blue).
    pub highlighted_task: Option<TaskId>,
    /// Task whose last status change succeeded (green).
    pub success_task: Option<TaskId>,
    /// Tasks with a status change in flight.
    pub updating: BTreeSet<TaskId>,
    pub project: ProjectContext,
}

impl BoardState {
    /// Swap in a freshly fetched batch. Columns are rebuilt and highlight
    /// markers dropped; the project context only moves forward.
    pub fn replace_tasks(&mut self, batch: TaskBatch) {
        self.columns = derive_columns(&batch.tasks);
        self.tasks = batch.tasks;
        self.highlighted_task = None;
        self.success_task = None;
        if batch.project.project_id().is_some() {
            self.project = batch.project;
        }
        log::info!("[BOARD] {} tasks in {} columns", self.tasks.len(), self.columns.len());
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    pub fn is_updating(&self, id: TaskId) -> bool {
        self.updating.contains(&id)
    }

    /// Column a task is drawn in: its own column if that exists, otherwise
    /// the `Other Status` bucket.
    pub fn display_column<'a>(&self, task: &'a Task) -> &'a str {
        if self.has_column(&task.column_id) {
            &task.column_id
        } else {
            OTHER_STATUS
        }
    }

    /// Tasks out of `tasks` (typically the filtered list) drawn in `column_id`,
    /// in board order.
    pub fn tasks_in_column<'a>(&self, tasks: &[&'a Task], column_id: &str) -> Vec<&'a Task> {
        tasks
            .iter()
            .copied()
            .filter(|t| self.display_column(t) == column_id)
            .collect()
    }

    // ========================
    // Status lookup highlighting
    // ========================

    /// Show the allowed next statuses of `task`: missing columns are created
    /// in status order and exactly the matching columns are highlighted.
    /// An empty lookup leaves the board untouched.
    pub fn apply_status_lookup(&mut self, task: TaskId, statuses: &[String]) -> bool {
        if statuses.is_empty() {
            return false;
        }
        self.clear_highlighting();

        for status in statuses {
            if insert_column(&mut self.columns, status) {
                log::debug!("[BOARD] Added column {}", status);
            }
        }
        let wanted: HashSet<&str> = statuses.iter().map(String::as_str).collect();
        for column in &mut self.columns {
            column.highlighted = wanted.contains(column.id.as_str());
        }
        self.highlighted_task = Some(task);
        true
    }

    pub fn clear_highlighting(&mut self) {
        self.highlighted_task = None;
        self.success_task = None;
        for column in &mut self.columns {
            column.highlighted = false;
        }
    }

    pub fn clear_column_highlights(&mut self) {
        for column in &mut self.columns {
            column.highlighted = false;
        }
    }

    // ========================
    // Provisional moves
    // ========================

    /// Dragged task hovers another task: take over its column and its slot
    /// in the task list.
    pub fn reassign_over_task(&mut self, active: TaskId, over: TaskId) -> bool {
        if active == over {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(active), self.position(over)) else {
            return false;
        };
        let target_column = self.tasks[to].column_id.clone();
        self.tasks[from].column_id = target_column;
        let moved = self.tasks.remove(from);
        self.tasks.insert(to, moved);
        true
    }

    /// Dragged task hovers a column body.
    pub fn reassign_over_column(&mut self, active: TaskId, column_id: &str) -> bool {
        match self.task_mut(active) {
            Some(task) if task.column_id != column_id => {
                task.column_id = column_id.to_string();
                true
            }
            _ => false,
        }
    }

    // ========================
    // Filter options
    // ========================

    pub fn unique_issue_types(&self) -> Vec<String> {
        unique(self.tasks.iter().map(|t| t.row.issue_type.as_str()))
    }

    pub fn unique_assignees(&self) -> Vec<String> {
        unique(self.tasks.iter().map(|t| t.row.assignee.as_str()))
    }
}

fn unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
