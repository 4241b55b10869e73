//! Request bodies for the report server.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::config::{BoardConfig, StatusCheckConfig};
use crate::domain::{DateRange, Task};
use crate::identity::Session;

const VISIBLE_COLUMNS: &str = "Actions,Sub Tasks,Issue Id,Sprint Name,Issue Type,Summary,Status,Assignee,\
Project Id,Record Id,Reporter,Estimated Hours,Detection Phase,Status Indicator,Team Member Email Id";

/// Issue types the sprint board leaves out.
const EXCLUDED_ISSUE_TYPES: [&str; 2] = ["Bug", "Task"];

/// Saved-view filter selecting one sprint.
pub fn task_view(sprint: &str, page_size: usize) -> Value {
    json!({
        "orderByFields": "",
        "filters": {
            "searchString": "",
            "columns": VISIBLE_COLUMNS,
            "groupedColumns": "",
            "rowHeight": null,
            "columnsOrder": VISIBLE_COLUMNS,
            "resizedColumns": [],
            "pageSize": page_size,
            "filters": [],
            "sorting": [],
            "CustomUserViewFilters": [
                {
                    "Order": 0,
                    "ColumnName": "Sprint Name",
                    "ElementType": "TextBox",
                    "ConditionType": "Equal",
                    "Value": sprint,
                    "IsEditable": true,
                    "IsVisible": false,
                    "SecondValue": "",
                    "SelectedValues": [sprint]
                },
                {
                    "Order": 1,
                    "ColumnName": "Issue Type",
                    "ElementType": "TextBox",
                    "ConditionType": "Is Not Any",
                    "SecondValue": "",
                    "IsVisible": false,
                    "IsEditable": true,
                    "SelectedValues": EXCLUDED_ISSUE_TYPES,
                    "IsDynamicFilter": true,
                    "IsMappedColumn": false,
                    "SelectedValue": ""
                }
            ]
        }
    })
}

/// Report dates are sent as a fixed 06:30 UTC instant on the given day.
pub fn report_date(day: NaiveDate) -> String {
    format!("{}T06:30:00.000Z", day.format("%Y-%m-%d"))
}

fn date_filter(label: &str, day: NaiveDate) -> Value {
    json!({
        "ElementType": "Date",
        "LabelName": label,
        "Condition": "Exact Date",
        "Type": "textType",
        "DefaultValue": report_date(day),
        "SecondValue": "",
        "MappingType": "Mapped"
    })
}

pub fn attendance_page(report_id: &str, range: &DateRange, skip: usize, top: usize) -> Value {
    json!({
        "reportId": report_id,
        "skip": skip,
        "top": top,
        "orderByFields": "",
        "filters": [date_filter("Fromdate", range.from), date_filter("Todate", range.to)],
        "groupAggregate": null,
        "isShowGrid": false
    })
}

pub fn status_check(
    config: &StatusCheckConfig,
    project_id: &str,
    issue_type: &str,
    current_status: &str,
) -> Value {
    let reference = |name: &str, value: &str, focused: bool| {
        json!({
            "IsFocused": focused,
            "ReferenceName": name,
            "Value": value,
            "SelectedValue": ""
        })
    };
    json!({
        "DataTableFunctionId": config.data_table_function_id,
        "DataTableId": config.data_table_id,
        "ReferencedElements": "",
        "DataTableDataReferenceDataDTOs": [
            reference("Project Id", project_id, false),
            reference("Issue Type", issue_type, false),
            reference("Current Status", current_status, false),
            reference("Next Status", "", true),
        ]
    })
}

/// Form fields the status-change app expects but the board never fills.
const BLANK_FIELDS: &[&str] = &[
    "Status",
    "Change Remarks",
    "Release Datetime",
    "Review Closed Task By",
    "Configurations",
    "Scripts",
    "Environment level",
    "Specific details",
    "Select Branch",
    "Select Required Components",
    "Any DB Scripts Exists",
    "Issue Remarks",
    "Mention the DB script",
    "Any configuration changes made",
    "Specify the configuration change",
    "Configurations added",
    "DB Scripts",
    "Migration scripts",
    "Configurations Files",
    "DB Files",
    "Migration files",
    "Dev Remarks",
    "Specify Impact Feature Related To Bug",
    "Var Sub Task Id",
    "Get Assignee Story Points",
    "Sub task Story Points",
    "Get ready for QA Issue id Grid",
    "_ExternalApiIds",
    "_InternalApiIds",
    "_DataFunctionIds",
    "_UserFunctionIds",
    "_UpdatedUserId",
    "_UpdatedUsername",
    "_UpdatedEmailId",
    "_NextStepUsers",
    "_UpdatedLocation",
];

const NULL_FIELDS: &[&str] = &[
    "Issue Id",
    "Issue Id for watch",
    "Assignee Story Points",
    "Story Sub Task Id",
    "Get ready for QA Issue id",
];

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}

/// Flat field mapping submitted to the "Change Issue Status" app.
pub fn status_update(
    config: &BoardConfig,
    task: &Task,
    new_status: &str,
    project_id: &str,
    session: &Session,
) -> Value {
    let row = &task.row;
    let app = &config.status_update;
    let indicator = if row.status_indicator.is_empty() { "In Progress" } else { row.status_indicator.as_str() };
    let changed_by = if row.team_member_email.is_empty() { &session.email } else { &row.team_member_email };

    let mut fields: Map<String, Value> = BLANK_FIELDS
        .iter()
        .map(|name| (name.to_string(), text("")))
        .chain(NULL_FIELDS.iter().map(|name| (name.to_string(), Value::Null)))
        .collect();

    let filled = [
        ("var Project Id", text(project_id)),
        ("var Issue Record Id", text(&row.record_id)),
        ("var Issue Id", text(&row.issue_id)),
        ("Project Id", text(project_id)),
        ("var Issue Type", text(&row.issue_type)),
        ("Issue Type", text(&row.issue_type)),
        ("var Current Assignee", text(&row.assignee)),
        ("var Issue Current Status", text(&row.status)),
        ("var Summary", text(&row.summary)),
        ("Current Status", text(&row.status)),
        ("Estimated Hours", text(&row.estimated_hours)),
        ("Detection Phase", text(&row.detection_phase)),
        ("New Status", text(new_status)),
        ("status Indicator Project Id", text(project_id)),
        ("status Indicator Issue Type", text(&row.issue_type)),
        ("status Indicator Status", text(&row.status)),
        ("Status Indicator", text(indicator)),
        ("Updated Date Time", text(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))),
        ("Logged In User Name", text(&session.display_name)),
        ("Watch List Details", Value::Array(Vec::new())),
        ("Status Changed User", text(changed_by)),
        ("Sprint Name", text(&row.sprint_name)),
        ("Story points Issue Id", text(&row.issue_id)),
        ("_AppId", text(&app.app_id)),
        ("_AppName", text(&app.app_name)),
        ("_CurrentStepNumber", json!(1)),
        ("_WorkSpaceId", text(&app.workspace_id)),
        ("_OrganizationId", text(&app.organization_id)),
        ("_NextGroupName", text(&app.next_group_name)),
        ("_IsCompleted", Value::Bool(true)),
        ("_UserId", text(&app.user_id)),
        ("_Username", text(&session.username)),
        ("_FullName", text(&session.display_name)),
        ("_UserEmailId", text(&session.email)),
        ("_WorkFlowAction", text(&app.workflow_action)),
    ];
    fields.extend(filled.into_iter().map(|(name, value)| (name.to_string(), value)));

    Value::Object(fields)
}

/// Query string of the save endpoint.
pub fn status_update_query(app_name: &str) -> String {
    format!(
        "appName={}&users=&startDate=null&dueDate=null",
        app_name.replace(' ', "%20")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskRow;

    fn session() -> Session {
        Session {
            display_name: "Asha Rao".into(),
            username: "asha@example.com".into(),
            email: "asha@example.com".into(),
        }
    }

    #[test]
    fn test_report_date_format() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(report_date(day), "2025-01-09T06:30:00.000Z");
    }

    #[test]
    fn test_attendance_page_carries_range() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        );
        let body = attendance_page("R1", &range, 50, 50);
        assert_eq!(body["skip"], 50);
        assert_eq!(body["filters"][0]["LabelName"], "Fromdate");
        assert_eq!(body["filters"][1]["DefaultValue"], "2025-11-30T06:30:00.000Z");
    }

    #[test]
    fn test_task_view_filters_sprint() {
        let body = task_view("DAP - 27", 100);
        let sprint = &body["filters"]["CustomUserViewFilters"][0];
        assert_eq!(sprint["Value"], "DAP - 27");
        assert_eq!(sprint["SelectedValues"][0], "DAP - 27");
    }

    #[test]
    fn test_status_update_fields() {
        let row = TaskRow {
            issue_id: "DAP-9".into(),
            status: "Coding".into(),
            issue_type: "Story".into(),
            ..Default::default()
        };
        let task = Task::from_row(0, row);
        let body = status_update(&BoardConfig::default(), &task, "Unit Testing", "70", &session());

        assert_eq!(body["Current Status"], "Coding");
        assert_eq!(body["New Status"], "Unit Testing");
        assert_eq!(body["Project Id"], "70");
        assert_eq!(body["Status Indicator"], "In Progress");
        assert_eq!(body["Status Changed User"], "asha@example.com");
        assert_eq!(body["_AppName"], "Change Issue Status");
        assert_eq!(body["Issue Id"], Value::Null);
        assert_eq!(body["Dev Remarks"], "");
    }

    #[test]
    fn test_status_update_query_encodes_spaces() {
        assert_eq!(
            status_update_query("Change Issue Status"),
            "appName=Change%20Issue%20Status&users=&startDate=null&dueDate=null"
        );
    }
}
