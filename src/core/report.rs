use crate::domain::model::{
    OutputFormat, RawAttendanceRecord, ReportArtifact, ReportRow, REPORT_COLUMNS,
};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use std::path::Path;

pub const DEFAULT_REPORT_FILENAME: &str = "site_manager_working_hours_report.csv";
pub const DEFAULT_REPORT_TITLE: &str = "Site Manager Check-In/Check-Out Report";

const REQUIRED_COLUMNS: [&str; 5] = [
    "Lithium ID",
    "Supervisor Name",
    "Attendance Date",
    "Primary Campus",
    "City",
];

#[derive(Debug, Clone, Default)]
pub struct ParsedExport {
    pub records: Vec<RawAttendanceRecord>,
    pub skipped_rows: usize,
}

/// Reads the raw export. Rows that don't deserialize (report footers, short
/// lines) are skipped and counted; a missing identifying column is an error.
pub fn read_raw_records(csv_text: &str) -> Result<ParsedExport> {
    let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(EtlError::ProcessingError {
                message: format!("attendance export is missing the '{}' column", column),
            });
        }
    }

    let mut parsed = ParsedExport::default();
    for (index, row) in reader.records().enumerate() {
        let record_no = index + 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping unreadable record {}: {}", record_no, e);
                parsed.skipped_rows += 1;
                continue;
            }
        };

        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        match row.deserialize::<RawAttendanceRecord>(Some(&headers)) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record {}: {}", record_no, e);
                parsed.skipped_rows += 1;
            }
        }
    }

    Ok(parsed)
}

pub fn write_report_csv(rows: &[ReportRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("report is not valid UTF-8: {}", e),
    })
}

pub fn write_report_json(rows: &[ReportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// `<title> for DD-MM-YYYY`
pub fn report_subject(title: &str, report_date: NaiveDate) -> String {
    format!("{} for {}", title, report_date.format("%d-%m-%Y"))
}

/// Builds one artifact per requested format. The CSV keeps the configured
/// name; other formats swap the extension.
pub fn build_artifacts(
    rows: &[ReportRow],
    filename: &str,
    title: &str,
    report_date: NaiveDate,
    formats: &[OutputFormat],
) -> Result<Vec<ReportArtifact>> {
    let subject = report_subject(title, report_date);

    formats
        .iter()
        .map(|format| {
            let content = match format {
                OutputFormat::Csv => write_report_csv(rows)?,
                OutputFormat::Json => write_report_json(rows)?,
            };
            Ok(ReportArtifact {
                filename: Path::new(filename)
                    .with_extension(format.extension())
                    .to_string_lossy()
                    .into_owned(),
                subject: subject.clone(),
                content: content.into_bytes(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\u{feff}Lithium ID,Supervisor Name,Attendance Date,Primary Campus,City,Check In,Check Out,Site Type\n\
LI-1,Asha Rao,21/03/2024,North Campus,Pune,\"21/03/2024, 09:00 AM\",\"21/03/2024, 06:00 PM\",School\n\
LI-2,Ravi Kumar,21/03/2024,South Campus,Mumbai,,\"21/03/2024, 05:00 PM\",School\n\
\n\
\"Grand Totals (2 records)\"\n";

    fn row(id: &str, hours: Option<f64>) -> ReportRow {
        ReportRow {
            lithium_id: id.to_string(),
            supervisor_name: "Asha Rao".to_string(),
            attendance_date: "21/03/2024".to_string(),
            primary_campus: "North Campus".to_string(),
            city: "Pune".to_string(),
            check_in: "09:00 AM".to_string(),
            check_out: (if hours.is_some() { "06:00 PM" } else { "Not checked out" }).to_string(),
            working_hours: hours,
        }
    }

    #[test]
    fn test_read_raw_records_skips_footer() {
        let parsed = read_raw_records(EXPORT).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped_rows, 1);
        assert_eq!(parsed.records[0].lithium_id, "LI-1");
        assert_eq!(
            parsed.records[0].check_in_raw.as_deref(),
            Some("21/03/2024, 09:00 AM")
        );
        assert_eq!(parsed.records[1].check_in_raw, None);
    }

    #[test]
    fn test_read_raw_records_requires_identity_columns() {
        let err = read_raw_records("Lithium ID,City\nLI-1,Pune\n").unwrap_err();
        assert!(matches!(err, EtlError::ProcessingError { .. }));
    }

    #[test]
    fn test_write_report_csv_columns_and_hours() {
        let csv = write_report_csv(&[row("LI-1", Some(9.0)), row("LI-2", None)]).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Lithium ID,Supervisor Name,Attendance Date,Primary Campus,City,Check In,Check Out,Working Hours"
        );
        assert_eq!(
            lines[1],
            "LI-1,Asha Rao,21/03/2024,North Campus,Pune,09:00 AM,06:00 PM,9.00"
        );
        assert_eq!(
            lines[2],
            "LI-2,Asha Rao,21/03/2024,North Campus,Pune,09:00 AM,Not checked out,"
        );
    }

    #[test]
    fn test_empty_report_still_has_header() {
        let csv = write_report_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Lithium ID,"));
    }

    #[test]
    fn test_build_artifacts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let artifacts = build_artifacts(
            &[row("LI-1", Some(9.0))],
            DEFAULT_REPORT_FILENAME,
            DEFAULT_REPORT_TITLE,
            date,
            &[OutputFormat::Csv, OutputFormat::Json],
        )
        .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].filename, "site_manager_working_hours_report.csv");
        assert_eq!(artifacts[1].filename, "site_manager_working_hours_report.json");
        assert_eq!(
            artifacts[0].subject,
            "Site Manager Check-In/Check-Out Report for 21-03-2024"
        );

        let json: serde_json::Value = serde_json::from_slice(&artifacts[1].content).unwrap();
        assert_eq!(json[0]["Lithium ID"], "LI-1");
        assert_eq!(json[0]["Working Hours"], 9.0);
    }

    #[test]
    fn test_json_hours_are_numbers_and_csv_hours_are_fixed_text() {
        let rows = [row("LI-1", Some(8.5)), row("LI-2", None)];

        let json: serde_json::Value =
            serde_json::from_str(&write_report_json(&rows).unwrap()).unwrap();
        assert!(json[0]["Working Hours"].is_f64());
        assert_eq!(json[0]["Working Hours"].as_f64(), Some(8.5));
        assert!(json[1]["Working Hours"].is_null());

        let csv = write_report_csv(&rows).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert!(lines[1].ends_with(",8.50"));
        assert!(lines[2].ends_with(",Not checked out,"));
    }
}
