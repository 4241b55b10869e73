//! Project Context
//!
//! The project id observed on the last task fetch, carried explicitly from
//! the fetch step to status lookups.

use serde::{Deserialize, Serialize};

use super::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    observed: Option<String>,
}

impl ProjectContext {
    pub fn observed(project_id: impl Into<String>) -> Self {
        Self { observed: Some(project_id.into()) }
    }

    /// Context from a fetched batch: the first task's "Project Id".
    /// A batch without one keeps `previous`.
    pub fn from_batch(tasks: &[Task], previous: &ProjectContext) -> Self {
        match tasks.first().map(|t| t.row.project_id.trim()) {
            Some(id) if !id.is_empty() => Self::observed(id),
            _ => {
                log::warn!("No Project Id in fetched tasks, keeping {:?}", previous.observed);
                previous.clone()
            }
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        self.observed.as_deref()
    }

    /// Explicit id, then the observed one, then `fallback`.
    pub fn resolve<'a>(&'a self, explicit: Option<&'a str>, fallback: &'a str) -> &'a str {
        explicit
            .filter(|id| !id.is_empty())
            .or(self.observed.as_deref())
            .unwrap_or(fallback)
    }
}
