//! Attendance normalization and working-hours computation.
//!
//! Every function here is pure: rows are independent of each other and a bad
//! punch never fails the batch, it just becomes [`Punch::Missing`].

use crate::domain::model::{
    NormalizedAttendanceRecord, Punch, RawAttendanceRecord, ReportRow,
};
use chrono::{Duration, NaiveDateTime};

/// Export format of the `Check In` / `Check Out` columns, e.g. `21/03/2024, 09:15 AM`.
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %I:%M %p";

#[derive(Debug, Default, Clone, Copy)]
pub struct AttendanceProcessor;

impl AttendanceProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parses a source timestamp and keeps only its time of day. The date is
    /// only used to validate the format.
    pub fn normalize_timestamp(&self, raw: Option<&str>) -> Punch {
        let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Punch::Missing;
        };

        match NaiveDateTime::parse_from_str(value, SOURCE_TIMESTAMP_FORMAT) {
            Ok(parsed) => Punch::Recorded(parsed.time()),
            Err(e) => {
                tracing::debug!("Unparseable punch '{}': {}", value, e);
                Punch::Missing
            }
        }
    }

    /// Hours between two punches, rounded to two decimals. A check-out earlier
    /// than the check-in is taken to fall on the next day.
    pub fn compute_working_hours(&self, check_in: Punch, check_out: Punch) -> Option<f64> {
        let (start, end) = (check_in.time()?, check_out.time()?);

        let mut elapsed = end.signed_duration_since(start);
        if end < start {
            elapsed = elapsed + Duration::hours(24);
        }

        let hours = elapsed.num_seconds() as f64 / 3600.0;
        Some(round_hours(hours))
    }

    pub fn normalize(&self, record: RawAttendanceRecord) -> NormalizedAttendanceRecord {
        let check_in = self.normalize_timestamp(record.check_in_raw.as_deref());
        let check_out = self.normalize_timestamp(record.check_out_raw.as_deref());
        let working_hours = self.compute_working_hours(check_in, check_out);

        NormalizedAttendanceRecord {
            lithium_id: record.lithium_id,
            supervisor_name: record.supervisor_name,
            attendance_date: record.attendance_date,
            primary_campus: record.primary_campus,
            city: record.city,
            check_in,
            check_out,
            working_hours,
        }
    }

    pub fn project(&self, record: &NormalizedAttendanceRecord) -> ReportRow {
        ReportRow {
            lithium_id: record.lithium_id.clone(),
            supervisor_name: record.supervisor_name.clone(),
            attendance_date: record.attendance_date.clone(),
            primary_campus: record.primary_campus.clone(),
            city: record.city.clone(),
            check_in: record.check_in_display(),
            check_out: record.check_out_display(),
            working_hours: record.working_hours,
        }
    }

    /// Normalizes a batch, keeping input order.
    pub fn process_batch(&self, rows: Vec<RawAttendanceRecord>) -> Vec<NormalizedAttendanceRecord> {
        rows.into_iter().map(|row| self.normalize(row)).collect()
    }
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
