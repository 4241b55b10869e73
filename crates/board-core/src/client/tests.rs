//! Report Client Tests
//!
//! Driven by a scripted transport that records every request.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tokio_util::sync::CancellationToken;

    use crate::client::{parse_next_statuses, HttpResponse, HttpTransport, ReportApi, ReportClient};
    use crate::config::BoardConfig;
    use crate::domain::{DateRange, ProjectContext, Task, TaskRow};
    use crate::error::{ReportError, ReportResult};
    use crate::identity::{Session, StaticIdentity};

    #[derive(Debug, Clone)]
    struct Request {
        url: String,
        bearer: Option<String>,
        body: Value,
    }

    #[derive(Default)]
    struct MockTransport {
        script: RefCell<VecDeque<ReportResult<HttpResponse>>>,
        requests: RefCell<Vec<Request>>,
        /// Cancelled as soon as a request is in flight.
        cancel_on_request: RefCell<Option<CancellationToken>>,
    }

    impl MockTransport {
        fn new(script: Vec<ReportResult<HttpResponse>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                requests: RefCell::new(Vec::new()),
                cancel_on_request: RefCell::new(None),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for Rc<MockTransport> {
        async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> ReportResult<HttpResponse> {
            self.requests.borrow_mut().push(Request {
                url: url.to_string(),
                bearer: bearer.map(str::to_string),
                body: body.clone(),
            });
            if let Some(token) = self.cancel_on_request.borrow().as_ref() {
                token.cancel();
            }
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ReportError::Transport("unscripted request".into())))
        }
    }

    fn signed_in() -> StaticIdentity {
        StaticIdentity::signed_in(Session {
            display_name: "Asha Rao".into(),
            username: "asha@example.com".into(),
            email: "asha@example.com".into(),
        })
    }

    fn client_with(
        script: Vec<ReportResult<HttpResponse>>,
        identity: StaticIdentity,
        config: BoardConfig,
    ) -> (ReportClient<Rc<MockTransport>>, Rc<MockTransport>) {
        let transport = Rc::new(MockTransport::new(script));
        let client = ReportClient::new(
            transport.clone(),
            config,
            Rc::new(Some("user-key-0123456789abcdef".to_string())),
            Rc::new(identity),
        );
        (client, transport)
    }

    fn setup_client(script: Vec<ReportResult<HttpResponse>>) -> (ReportClient<Rc<MockTransport>>, Rc<MockTransport>) {
        client_with(script, signed_in(), BoardConfig::default())
    }

    fn small_pages() -> BoardConfig {
        BoardConfig {
            task_page_size: 2,
            attendance_page_size: 2,
            ..BoardConfig::default()
        }
    }

    fn task_page(rows: Value, total: usize) -> ReportResult<HttpResponse> {
        let body = json!({ "Status": true, "results": rows.to_string(), "__count": total });
        Ok(HttpResponse::ok(body.to_string()))
    }

    fn task_row(id: &str, status: &str) -> Value {
        json!({ "Issue Id": id, "Summary": "s", "Status": status, "Project Id": "31" })
    }

    fn week() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        )
    }

    fn sample_task() -> Task {
        Task::from_row(0, TaskRow {
            issue_id: "DAP-1".into(),
            status: "Coding".into(),
            ..Default::default()
        })
    }

    // ========================
    // Task fetch
    // ========================

    #[tokio::test]
    async fn test_fetch_tasks_pages_until_total() {
        let (client, transport) = client_with(
            vec![
                task_page(json!([task_row("A", "New"), task_row("B", "Coding")]), 3),
                task_page(json!([task_row("C", "Closed")]), 3),
            ],
            signed_in(),
            small_pages(),
        );

        let batch = client.fetch_tasks("DAP - 26").await.unwrap();
        assert_eq!(batch.tasks.len(), 3);
        assert_eq!(batch.tasks[2].id.0, 3);
        assert_eq!(batch.tasks[1].column_id, "Coding");
        assert_eq!(batch.project.project_id(), Some("31"));

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.contains("skip=0&take=2"));
        assert!(requests[1].url.contains("skip=2&take=2"));
        assert_eq!(requests[0].bearer.as_deref(), Some("user-key-0123456789abcdef"));
    }

    #[tokio::test]
    async fn test_fetch_tasks_no_request_after_exact_total() {
        let (client, transport) = client_with(
            vec![task_page(json!([task_row("A", "New"), task_row("B", "New")]), 2)],
            signed_in(),
            small_pages(),
        );
        assert_eq!(client.fetch_tasks("S").await.unwrap().tasks.len(), 2);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_tasks_unsuccessful_status_fails() {
        let body = json!({ "Status": false, "results": "[]", "__count": 0 }).to_string();
        let (client, _) = setup_client(vec![Ok(HttpResponse::ok(body))]);
        assert!(matches!(client.fetch_tasks("S").await, Err(ReportError::Api(_))));
    }

    #[tokio::test]
    async fn test_fetch_tasks_http_error_discards_pages() {
        let (client, transport) = client_with(
            vec![
                task_page(json!([task_row("A", "New"), task_row("B", "New")]), 10),
                Ok(HttpResponse { status: 500, body: "boom".into() }),
            ],
            signed_in(),
            small_pages(),
        );
        let err = client.fetch_tasks("S").await.unwrap_err();
        assert_eq!(err, ReportError::Http { status: 500, body: "boom".into() });
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_tasks_malformed_body() {
        let (client, _) = setup_client(vec![Ok(HttpResponse::ok("<html>"))]);
        assert!(matches!(client.fetch_tasks("S").await, Err(ReportError::Parse(_))));
    }

    // ========================
    // Attendance
    // ========================

    #[tokio::test]
    async fn test_attendance_status_false_with_results_is_success() {
        let rows = json!([{ "Employee Name": "Asha", "S No": 1 }]);
        let body = json!({ "Status": false, "results": rows.to_string(), "__count": 1 });
        let (client, transport) = setup_client(vec![Ok(HttpResponse::ok(body.to_string()))]);

        let records = client.fetch_attendance(&week(), &CancellationToken::new()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_name, "Asha");

        let requests = transport.requests.borrow();
        assert!(requests[0].url.ends_with("/Report/GetGridReportData"));
        assert_eq!(requests[0].body["filters"][0]["DefaultValue"], "2025-11-24T06:30:00.000Z");
    }

    #[tokio::test]
    async fn test_attendance_without_results_fails() {
        let body = json!({ "Status": false, "results": "", "__count": 0 });
        let (client, _) = setup_client(vec![Ok(HttpResponse::ok(body.to_string()))]);
        let result = client.fetch_attendance(&week(), &CancellationToken::new()).await;
        assert_eq!(result, Err(ReportError::NoResults));
    }

    #[tokio::test]
    async fn test_attendance_cancelled_before_start() {
        let (client, transport) = setup_client(vec![]);
        let token = CancellationToken::new();
        token.cancel();
        let result = client.fetch_attendance(&week(), &token).await;
        assert_eq!(result, Err(ReportError::Cancelled));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_attendance_cancelled_mid_fetch() {
        let rows = json!([{ "Employee Name": "Asha" }, { "Employee Name": "Lee" }]);
        let body = json!({ "Status": true, "results": rows.to_string(), "__count": 4 });
        let (client, transport) = client_with(
            vec![Ok(HttpResponse::ok(body.to_string())), Ok(HttpResponse::ok(body.to_string()))],
            signed_in(),
            small_pages(),
        );
        let token = CancellationToken::new();
        *transport.cancel_on_request.borrow_mut() = Some(token.clone());

        let result = client.fetch_attendance(&week(), &token).await;

        assert_eq!(result, Err(ReportError::Cancelled));
        assert_eq!(transport.request_count(), 1);
    }

    // ========================
    // Status update
    // ========================

    #[tokio::test]
    async fn test_update_requires_session_before_network() {
        let (client, transport) = client_with(vec![], StaticIdentity::anonymous(), BoardConfig::default());
        let result = client
            .update_task_status(&sample_task(), "Unit Testing", &ProjectContext::default())
            .await;
        assert_eq!(result, Err(ReportError::AuthRequired));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_incomplete_session_is_auth_required() {
        let identity = StaticIdentity::signed_in(Session { username: "x".into(), ..Default::default() });
        let (client, transport) = client_with(vec![], identity, BoardConfig::default());
        let result = client
            .update_task_status(&sample_task(), "Unit Testing", &ProjectContext::default())
            .await;
        assert!(result.unwrap_err().is_auth_required());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_posts_change() {
        let body = json!({ "Status": true, "results": "ok" }).to_string();
        let (client, transport) = setup_client(vec![Ok(HttpResponse::ok(body))]);

        let receipt = client
            .update_task_status(&sample_task(), "Unit Testing", &ProjectContext::observed("12"))
            .await
            .unwrap();
        assert_eq!(receipt.results, Some(Value::String("ok".into())));

        let requests = transport.requests.borrow();
        assert!(requests[0].url.contains("App/SaveAppData?appName=Change%20Issue%20Status"));
        assert_eq!(requests[0].body["New Status"], "Unit Testing");
        assert_eq!(requests[0].body["Project Id"], "12");
        assert_eq!(requests[0].body["_UserEmailId"], "asha@example.com");
    }

    #[tokio::test]
    async fn test_update_http_error_carries_body() {
        let (client, _) = setup_client(vec![Ok(HttpResponse { status: 400, body: "bad status".into() })]);
        let err = client
            .update_task_status(&sample_task(), "Closed", &ProjectContext::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 400, message: bad status");
    }

    // ========================
    // Next statuses
    // ========================

    #[test]
    fn test_both_status_shapes_normalize_equally() {
        let rows = json!([{ "AppData": "Unit Testing" }, { "AppData": "Coding Review" }, { "Other": 1 }]);
        let bare = parse_next_statuses(&rows.to_string()).unwrap();
        let wrapped = json!({ "Status": true, "results": rows.to_string(), "__count": 3 });
        let enveloped = parse_next_statuses(&wrapped.to_string()).unwrap();

        assert_eq!(bare, vec!["Unit Testing", "Coding Review"]);
        assert_eq!(bare, enveloped);
    }

    #[test]
    fn test_status_envelope_unsuccessful() {
        let body = json!({ "Status": false, "results": "[]" }).to_string();
        assert!(matches!(parse_next_statuses(&body), Err(ReportError::Api(_))));
    }

    #[tokio::test]
    async fn test_check_uses_fallback_project() {
        let (client, transport) = setup_client(vec![Ok(HttpResponse::ok("[]"))]);
        let statuses = client
            .check_next_statuses("Story", "Coding", &ProjectContext::default())
            .await
            .unwrap();
        assert!(statuses.is_empty());

        let requests = transport.requests.borrow();
        let references = &requests[0].body["DataTableDataReferenceDataDTOs"];
        assert_eq!(references[0]["Value"], "70");
        assert_eq!(references[3]["IsFocused"], true);
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_no_authorization() {
        let transport = Rc::new(MockTransport::new(vec![Ok(HttpResponse::ok("[]"))]));
        let client = ReportClient::new(
            transport.clone(),
            BoardConfig::default(),
            Rc::new(None::<String>),
            Rc::new(signed_in()),
        );
        client.check_next_statuses("Story", "New", &ProjectContext::default()).await.unwrap();
        assert_eq!(transport.requests.borrow()[0].bearer, None);
    }
}
