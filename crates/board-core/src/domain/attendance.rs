//! Attendance Records
//!
//! Rows of the attendance & worklog report plus the date ranges they cover.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inclusive date range sent to the attendance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }
}

/// Quick-pick options on the attendance page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportType {
    #[default]
    ThisWeek,
    LastWeek,
    Today,
    Yesterday,
    CustomDate,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::ThisWeek,
        ReportType::LastWeek,
        ReportType::Today,
        ReportType::Yesterday,
        ReportType::CustomDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportType::ThisWeek => "This Week",
            ReportType::LastWeek => "Last Week",
            ReportType::Today => "Today",
            ReportType::Yesterday => "Yesterday",
            ReportType::CustomDate => "Custom Date",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Range for this option relative to `today`. Weeks run Monday to Sunday.
    /// `CustomDate` has no implied range.
    pub fn range(self, today: NaiveDate) -> Option<DateRange> {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        match self {
            ReportType::ThisWeek => Some(DateRange::new(monday, monday + Duration::days(6))),
            ReportType::LastWeek => {
                let last_monday = monday - Duration::days(7);
                Some(DateRange::new(last_monday, last_monday + Duration::days(6)))
            }
            ReportType::Today => Some(DateRange::single(today)),
            ReportType::Yesterday => Some(DateRange::single(today - Duration::days(1))),
            ReportType::CustomDate => None,
        }
    }
}

/// Table columns: (record key, header label).
pub const ATTENDANCE_COLUMNS: &[(&str, &str)] = &[
    ("S No", "S No"),
    ("Employee Code", "Employee Code"),
    ("Attendance Id", "Attendance Id"),
    ("Employee Name", "Employee Name"),
    ("Department", "Department"),
    ("Reporting Manager Name", "Reporting Manager"),
    ("Employee Email Id", "Email"),
    ("Date", "Date"),
    ("Day", "Day"),
    ("In Time", "In Time"),
    ("Out Time", "Out Time"),
    ("Total Hours", "Total Hours"),
    ("Greater than 10AM and Less than 5PM", ">10AM & <5PM"),
    ("Less than 7 Hours", "<7 Hours"),
    ("Attendance Type", "Attendance Type"),
    ("Balance Day Period", "Balance Day Period"),
    ("Application 1 Status", "App 1 Status"),
    ("Application 2 Status", "App 2 Status"),
    ("Application 1 Pending With", "App 1 Pending With"),
    ("Application 2 Pending With", "App 2 Pending With"),
    ("Punch Status", "Punch Status"),
    ("Total Log Hours", "Total Log Hours"),
    ("Log Hours Before 11 AM", "Log Before 11AM"),
    ("Log Hours After 11 AM", "Log After 11AM"),
    ("First Log DateTime", "First Log"),
    ("Last Log DateTime", "Last Log"),
    ("cutoffdatetime", "Cutoff DateTime"),
    ("No of Times Logged", "Times Logged"),
    ("Log Status", "Log Status"),
    ("Month", "Month"),
    ("Year", "Year"),
    ("First Half", "First Half"),
    ("Second Half", "Second Half"),
];

/// One attendance/worklog row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "S No", default, deserialize_with = "lenient_number")]
    pub serial_no: f64,
    #[serde(rename = "Employee Code", default, deserialize_with = "lenient_text")]
    pub employee_code: String,
    #[serde(rename = "Attendance Id", default, deserialize_with = "lenient_text")]
    pub attendance_id: String,
    #[serde(rename = "Employee Name", default, deserialize_with = "lenient_text")]
    pub employee_name: String,
    #[serde(rename = "Department", default, deserialize_with = "lenient_text")]
    pub department: String,
    #[serde(rename = "Reporting Manager Name", default, deserialize_with = "lenient_text")]
    pub reporting_manager: String,
    #[serde(rename = "Employee Email Id", default, deserialize_with = "lenient_text")]
    pub employee_email: String,
    #[serde(rename = "Date", default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(rename = "Day", default, deserialize_with = "lenient_text")]
    pub day: String,
    #[serde(rename = "In Time", default, deserialize_with = "lenient_text")]
    pub in_time: String,
    #[serde(rename = "Out Time", default, deserialize_with = "lenient_text")]
    pub out_time: String,
    #[serde(rename = "Total Hours", default, deserialize_with = "lenient_text")]
    pub total_hours: String,
    #[serde(rename = "Greater than 10AM and Less than 5PM", default, deserialize_with = "lenient_text")]
    pub core_hours_flag: String,
    #[serde(rename = "Less than 7 Hours", default, deserialize_with = "lenient_text")]
    pub short_day_flag: String,
    #[serde(rename = "Attendance Type", default, deserialize_with = "lenient_text")]
    pub attendance_type: String,
    #[serde(rename = "Balance Day Period", default, deserialize_with = "lenient_text")]
    pub balance_day_period: String,
    #[serde(rename = "Application 1 Status", default, deserialize_with = "lenient_text")]
    pub application_1_status: String,
    #[serde(rename = "Application 2 Status", default, deserialize_with = "lenient_text")]
    pub application_2_status: String,
    #[serde(rename = "Application 1 Pending With", default, deserialize_with = "lenient_text")]
    pub application_1_pending_with: String,
    #[serde(rename = "Application 2 Pending With", default, deserialize_with = "lenient_text")]
    pub application_2_pending_with: String,
    #[serde(rename = "Punch Status", default, deserialize_with = "lenient_text")]
    pub punch_status: String,
    #[serde(rename = "Total Log Hours", default, deserialize_with = "lenient_number")]
    pub total_log_hours: f64,
    #[serde(rename = "Log Hours Before 11 AM", default, deserialize_with = "lenient_number")]
    pub log_hours_before_11: f64,
    #[serde(rename = "Log Hours After 11 AM", default, deserialize_with = "lenient_number")]
    pub log_hours_after_11: f64,
    #[serde(rename = "First Log DateTime", default, deserialize_with = "lenient_text")]
    pub first_log: String,
    #[serde(rename = "Last Log DateTime", default, deserialize_with = "lenient_text")]
    pub last_log: String,
    #[serde(rename = "cutoffdatetime", default, deserialize_with = "lenient_text")]
    pub cutoff: String,
    #[serde(rename = "No of Times Logged", default, deserialize_with = "lenient_number")]
    pub times_logged: f64,
    #[serde(rename = "Log Status", default, deserialize_with = "lenient_text")]
    pub log_status: String,
    #[serde(rename = "Month", default, deserialize_with = "lenient_text")]
    pub month: String,
    #[serde(rename = "Year", default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(rename = "First Half", default, deserialize_with = "lenient_text")]
    pub first_half: String,
    #[serde(rename = "Second Half", default, deserialize_with = "lenient_text")]
    pub second_half: String,
}

impl AttendanceRecord {
    /// Display text for the column `key`; `"-"` when empty or unknown.
    pub fn cell(&self, key: &str) -> String {
        let text = match key {
            "S No" => format_number(self.serial_no),
            "Employee Code" => self.employee_code.clone(),
            "Attendance Id" => self.attendance_id.clone(),
            "Employee Name" => self.employee_name.clone(),
            "Department" => self.department.clone(),
            "Reporting Manager Name" => self.reporting_manager.clone(),
            "Employee Email Id" => self.employee_email.clone(),
            "Date" => self.date.clone(),
            "Day" => self.day.clone(),
            "In Time" => self.in_time.clone(),
            "Out Time" => self.out_time.clone(),
            "Total Hours" => self.total_hours.clone(),
            "Greater than 10AM and Less than 5PM" => self.core_hours_flag.clone(),
            "Less than 7 Hours" => self.short_day_flag.clone(),
            "Attendance Type" => self.attendance_type.clone(),
            "Balance Day Period" => self.balance_day_period.clone(),
            "Application 1 Status" => self.application_1_status.clone(),
            "Application 2 Status" => self.application_2_status.clone(),
            "Application 1 Pending With" => self.application_1_pending_with.clone(),
            "Application 2 Pending With" => self.application_2_pending_with.clone(),
            "Punch Status" => self.punch_status.clone(),
            "Total Log Hours" => format_number(self.total_log_hours),
            "Log Hours Before 11 AM" => format_number(self.log_hours_before_11),
            "Log Hours After 11 AM" => format_number(self.log_hours_after_11),
            "First Log DateTime" => self.first_log.clone(),
            "Last Log DateTime" => self.last_log.clone(),
            "cutoffdatetime" => self.cutoff.clone(),
            "No of Times Logged" => format_number(self.times_logged),
            "Log Status" => self.log_status.clone(),
            "Month" => self.month.clone(),
            "Year" => self.year.clone(),
            "First Half" => self.first_half.clone(),
            "Second Half" => self.second_half.clone(),
            _ => String::new(),
        };
        if text.is_empty() { "-".to_string() } else { text }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{:.2}", n)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_this_week_runs_monday_to_sunday() {
        // 2025-11-26 is a Wednesday
        let range = ReportType::ThisWeek.range(date(2025, 11, 26)).unwrap();
        assert_eq!(range, DateRange::new(date(2025, 11, 24), date(2025, 11, 30)));
    }

    #[test]
    fn test_sunday_belongs_to_preceding_week() {
        let range = ReportType::ThisWeek.range(date(2025, 11, 30)).unwrap();
        assert_eq!(range.from, date(2025, 11, 24));
        let last = ReportType::LastWeek.range(date(2025, 11, 30)).unwrap();
        assert_eq!(last, DateRange::new(date(2025, 11, 17), date(2025, 11, 23)));
    }

    #[test]
    fn test_single_day_ranges() {
        let today = date(2025, 3, 1);
        assert_eq!(ReportType::Today.range(today), Some(DateRange::single(today)));
        assert_eq!(ReportType::Yesterday.range(today), Some(DateRange::single(date(2025, 2, 28))));
        assert_eq!(ReportType::CustomDate.range(today), None);
    }

    #[test]
    fn test_record_cells() {
        let raw = r#"{"S No": 236300, "Employee Name": "Asha Rao", "Out Time": "",
                      "Total Log Hours": "7.5", "No of Times Logged": 3}"#;
        let record: AttendanceRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.cell("S No"), "236300");
        assert_eq!(record.cell("Employee Name"), "Asha Rao");
        assert_eq!(record.cell("Out Time"), "-");
        assert_eq!(record.cell("Total Log Hours"), "7.50");
        assert_eq!(record.cell("No of Times Logged"), "3");
    }

    #[test]
    fn test_report_type_labels_round_trip() {
        for t in ReportType::ALL {
            assert_eq!(ReportType::from_label(t.label()), Some(t));
        }
    }
}
