use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Display format for a punch once the date part has been dropped.
pub const DISPLAY_TIME_FORMAT: &str = "%I:%M %p";

/// One row of the attendance export, one per supervisor per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttendanceRecord {
    #[serde(rename = "Lithium ID")]
    pub lithium_id: String,
    #[serde(rename = "Supervisor Name")]
    pub supervisor_name: String,
    #[serde(rename = "Attendance Date")]
    pub attendance_date: String,
    #[serde(rename = "Primary Campus")]
    pub primary_campus: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Check In", default)]
    pub check_in_raw: Option<String>,
    #[serde(rename = "Check Out", default)]
    pub check_out_raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchKind {
    CheckIn,
    CheckOut,
}

impl PunchKind {
    pub fn sentinel(self) -> &'static str {
        match self {
            PunchKind::CheckIn => "Not checked in",
            PunchKind::CheckOut => "Not checked out",
        }
    }
}

/// A single check-in or check-out, reduced to its time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punch {
    Recorded(NaiveTime),
    Missing,
}

impl Punch {
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Punch::Recorded(time) => Some(*time),
            Punch::Missing => None,
        }
    }

    pub fn display(&self, kind: PunchKind) -> String {
        match self {
            Punch::Recorded(time) => time.format(DISPLAY_TIME_FORMAT).to_string(),
            Punch::Missing => kind.sentinel().to_string(),
        }
    }

    /// Parses a value previously produced by [`Punch::display`]. Sentinels
    /// and anything else unparseable come back as `Missing`.
    pub fn from_display(text: &str) -> Self {
        NaiveTime::parse_from_str(text.trim(), DISPLAY_TIME_FORMAT)
            .map(Punch::Recorded)
            .unwrap_or(Punch::Missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAttendanceRecord {
    pub lithium_id: String,
    pub supervisor_name: String,
    pub attendance_date: String,
    pub primary_campus: String,
    pub city: String,
    pub check_in: Punch,
    pub check_out: Punch,
    pub working_hours: Option<f64>,
}

impl NormalizedAttendanceRecord {
    pub fn check_in_display(&self) -> String {
        self.check_in.display(PunchKind::CheckIn)
    }

    pub fn check_out_display(&self) -> String {
        self.check_out.display(PunchKind::CheckOut)
    }
}

/// A row of the delivered report. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Lithium ID")]
    pub lithium_id: String,
    #[serde(rename = "Supervisor Name")]
    pub supervisor_name: String,
    #[serde(rename = "Attendance Date")]
    pub attendance_date: String,
    #[serde(rename = "Primary Campus")]
    pub primary_campus: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Check In")]
    pub check_in: String,
    #[serde(rename = "Check Out")]
    pub check_out: String,
    #[serde(rename = "Working Hours")]
    pub working_hours: Option<f64>,
}

impl ReportRow {
    /// Fixed two-decimal text for the delimited report, empty when absent.
    pub fn working_hours_text(&self) -> String {
        self.working_hours
            .map(|h| format!("{:.2}", h))
            .unwrap_or_default()
    }

    pub fn to_record(&self) -> [String; 8] {
        [
            self.lithium_id.clone(),
            self.supervisor_name.clone(),
            self.attendance_date.clone(),
            self.primary_campus.clone(),
            self.city.clone(),
            self.check_in.clone(),
            self.check_out.clone(),
            self.working_hours_text(),
        ]
    }
}

pub const REPORT_COLUMNS: [&str; 8] = [
    "Lithium ID",
    "Supervisor Name",
    "Attendance Date",
    "Primary Campus",
    "City",
    "Check In",
    "Check Out",
    "Working Hours",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unsupported output format: {}", other)),
        }
    }
}

/// Named file handed to the delivery side.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub filename: String,
    pub subject: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<NormalizedAttendanceRecord>,
    pub artifacts: Vec<ReportArtifact>,
}
