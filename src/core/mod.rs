pub mod etl;
pub mod pipeline;
pub mod processor;
pub mod report;

pub use crate::domain::model::{NormalizedAttendanceRecord, Punch, RawAttendanceRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ReportSource, Storage};
pub use crate::utils::error::Result;
