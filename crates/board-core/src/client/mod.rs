//! Report Client
//!
//! Talks to the remote report server: sprint tasks, attendance rows, status
//! changes and the workflow-rule lookup of allowed next statuses.

mod pagination;
pub mod payloads;
mod transport;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

pub use pagination::{paginate, Page};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

use crate::config::BoardConfig;
use crate::domain::{AttendanceRecord, DateRange, ProjectContext, Task, TaskRow};
use crate::error::{ReportError, ReportResult};
use crate::identity::IdentityProvider;
use crate::repository::{KeyValueStore, PreferenceStore};

/// Where the bearer token comes from.
pub trait TokenSource {
    fn bearer_token(&self) -> Option<String>;
}

impl<S: KeyValueStore> TokenSource for PreferenceStore<S> {
    fn bearer_token(&self) -> Option<String> {
        self.api_key()
    }
}

impl TokenSource for Option<String> {
    fn bearer_token(&self) -> Option<String> {
        self.clone()
    }
}

/// Tasks of one sprint and the project they were observed in.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBatch {
    pub tasks: Vec<Task>,
    pub project: ProjectContext,
}

/// What the save endpoint answered for a status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdateReceipt {
    pub results: Option<Value>,
    pub message: Option<String>,
}

#[async_trait(?Send)]
pub trait ReportApi {
    /// All tasks of `sprint`, every page.
    async fn fetch_tasks(&self, sprint: &str) -> ReportResult<TaskBatch>;

    /// All attendance rows in `range`. Cancelling `cancel` abandons the
    /// in-flight page and yields `ReportError::Cancelled`.
    async fn fetch_attendance(
        &self,
        range: &DateRange,
        cancel: &CancellationToken,
    ) -> ReportResult<Vec<AttendanceRecord>>;

    /// Submit a status change. Fails with `AuthRequired` before any request
    /// when nobody is signed in.
    async fn update_task_status(
        &self,
        task: &Task,
        new_status: &str,
        project: &ProjectContext,
    ) -> ReportResult<StatusUpdateReceipt>;

    /// Statuses the workflow rules allow after `current_status`.
    async fn check_next_statuses(
        &self,
        issue_type: &str,
        current_status: &str,
        project: &ProjectContext,
    ) -> ReportResult<Vec<String>>;
}

/// Report envelope: `{Status, results: <json>, __count}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Status", default)]
    status: bool,
    #[serde(default)]
    results: Option<Value>,
    #[serde(rename = "__count", default)]
    count: Option<usize>,
    #[serde(default)]
    message: Option<String>,
}

/// `results` arrives as a JSON-encoded string, occasionally as the array itself.
fn decode_results<T: DeserializeOwned>(results: Value) -> ReportResult<Vec<T>> {
    match results {
        Value::String(encoded) => Ok(serde_json::from_str(&encoded)?),
        Value::Array(_) => Ok(serde_json::from_value(results)?),
        other => Err(ReportError::Parse(format!("unexpected results payload: {}", other))),
    }
}

fn has_rows(results: &Value) -> bool {
    match results {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn successful_body(resp: HttpResponse) -> ReportResult<String> {
    if resp.is_success() {
        Ok(resp.body)
    } else {
        Err(ReportError::Http { status: resp.status, body: resp.body })
    }
}

/// Next statuses from either a bare row array or an envelope whose
/// `results` holds the encoded rows. Each row's `AppData` is one status.
pub fn parse_next_statuses(body: &str) -> ReportResult<Vec<String>> {
    let rows: Vec<Value> = match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => rows,
        other => {
            let envelope: Envelope = serde_json::from_value(other)?;
            if !envelope.status {
                return Err(ReportError::Api(envelope.message.unwrap_or_default()));
            }
            match envelope.results.filter(has_rows) {
                Some(results) => decode_results(results)?,
                None => Vec::new(),
            }
        }
    };

    Ok(rows
        .iter()
        .filter_map(|row| row.get("AppData").and_then(Value::as_str))
        .filter(|status| !status.is_empty())
        .map(str::to_string)
        .collect())
}

/// HTTP implementation of [`ReportApi`].
pub struct ReportClient<T> {
    transport: T,
    config: BoardConfig,
    tokens: Rc<dyn TokenSource>,
    identity: Rc<dyn IdentityProvider>,
}

impl<T: HttpTransport> ReportClient<T> {
    pub fn new(
        transport: T,
        config: BoardConfig,
        tokens: Rc<dyn TokenSource>,
        identity: Rc<dyn IdentityProvider>,
    ) -> Self {
        Self { transport, config, tokens, identity }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    async fn post(&self, url: &str, body: &Value) -> ReportResult<String> {
        let token = self.tokens.bearer_token();
        if token.is_none() {
            log::warn!("No API key configured, sending request without Authorization");
        }
        let resp = self.transport.post_json(url, token.as_deref(), body).await?;
        successful_body(resp)
    }

    async fn task_page(&self, sprint: &str, skip: usize) -> ReportResult<Page<TaskRow>> {
        let take = self.config.task_page_size;
        let url = format!(
            "{}?skip={}&take={}&viewId={}",
            self.config.endpoint("Report/GetViewResult"),
            skip,
            take,
            self.config.view_id
        );
        let body = self.post(&url, &payloads::task_view(sprint, take)).await?;
        let envelope: Envelope = serde_json::from_str(&body)?;
        if !envelope.status {
            return Err(ReportError::Api(envelope.message.unwrap_or_default()));
        }
        let results = envelope.results.ok_or(ReportError::NoResults)?;
        Ok(Page {
            rows: decode_results(results)?,
            total: envelope.count.unwrap_or_default(),
        })
    }

    async fn attendance_page(&self, range: &DateRange, skip: usize) -> ReportResult<Page<AttendanceRecord>> {
        let payload = payloads::attendance_page(
            &self.config.attendance_report_id,
            range,
            skip,
            self.config.attendance_page_size,
        );
        let body = self.post(&self.config.endpoint("Report/GetGridReportData"), &payload).await?;
        let envelope: Envelope = serde_json::from_str(&body)?;
        // This report answers Status:false even when rows are present.
        let results = envelope.results.filter(has_rows).ok_or(ReportError::NoResults)?;
        Ok(Page {
            rows: decode_results(results)?,
            total: envelope.count.unwrap_or_default(),
        })
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> ReportApi for ReportClient<T> {
    async fn fetch_tasks(&self, sprint: &str) -> ReportResult<TaskBatch> {
        log::info!("Fetching tasks for sprint {}", sprint);
        let rows = paginate(self.config.task_page_size, None, |skip| self.task_page(sprint, skip)).await?;
        log::info!("Fetched {} tasks", rows.len());

        let tasks: Vec<Task> = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| Task::from_row(index, row))
            .collect();
        let project = ProjectContext::from_batch(&tasks, &ProjectContext::default());
        Ok(TaskBatch { tasks, project })
    }

    async fn fetch_attendance(
        &self,
        range: &DateRange,
        cancel: &CancellationToken,
    ) -> ReportResult<Vec<AttendanceRecord>> {
        log::info!("Fetching attendance {} to {}", range.from, range.to);
        let rows = paginate(self.config.attendance_page_size, Some(cancel), |skip| {
            self.attendance_page(range, skip)
        })
        .await?;
        log::info!("Fetched {} attendance rows", rows.len());
        Ok(rows)
    }

    async fn update_task_status(
        &self,
        task: &Task,
        new_status: &str,
        project: &ProjectContext,
    ) -> ReportResult<StatusUpdateReceipt> {
        let session = match self.identity.session() {
            Some(session) if session.is_complete() => session,
            _ => {
                log::warn!("Status change for {} refused: not signed in", task.issue_id());
                return Err(ReportError::AuthRequired);
            }
        };

        let project_id = project.resolve(Some(task.row.project_id.as_str()), &self.config.fallback_project_id);
        let payload = payloads::status_update(&self.config, task, new_status, project_id, &session);
        let url = format!(
            "{}?{}",
            self.config.endpoint("App/SaveAppData"),
            payloads::status_update_query(&self.config.status_update.app_name)
        );

        log::info!("Changing {} from {} to {}", task.issue_id(), task.row.status, new_status);
        let body = self.post(&url, &payload).await?;
        if body.trim().is_empty() {
            return Ok(StatusUpdateReceipt { results: None, message: None });
        }
        let data: Value = serde_json::from_str(&body)?;
        Ok(StatusUpdateReceipt {
            results: data.get("results").cloned().filter(|v| !v.is_null()),
            message: data.get("message").and_then(Value::as_str).map(str::to_string),
        })
    }

    async fn check_next_statuses(
        &self,
        issue_type: &str,
        current_status: &str,
        project: &ProjectContext,
    ) -> ReportResult<Vec<String>> {
        let project_id = project.resolve(None, &self.config.fallback_project_id);
        if project.project_id().is_none() {
            log::warn!("No project observed yet, using fallback project id {}", project_id);
        }
        let payload = payloads::status_check(&self.config.status_check, project_id, issue_type, current_status);
        let body = self
            .post(&self.config.endpoint("DataTable/GetDataTableDataByReference"), &payload)
            .await?;
        parse_next_statuses(&body)
    }
}
