use crate::core::processor::AttendanceProcessor;
use crate::core::report::{build_artifacts, read_raw_records};
use crate::domain::model::{RawAttendanceRecord, ReportRow, TransformResult};
use crate::domain::ports::{ConfigProvider, Pipeline, ReportSource, Storage};
use crate::utils::error::Result;

pub struct AttendancePipeline<R: ReportSource, S: Storage, C: ConfigProvider> {
    source: R,
    storage: S,
    config: C,
    processor: AttendanceProcessor,
}

impl<R: ReportSource, S: Storage, C: ConfigProvider> AttendancePipeline<R, S, C> {
    pub fn new(source: R, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
            processor: AttendanceProcessor::new(),
        }
    }
}

#[async_trait::async_trait]
impl<R: ReportSource, S: Storage, C: ConfigProvider> Pipeline for AttendancePipeline<R, S, C> {
    async fn extract(&self) -> Result<Vec<RawAttendanceRecord>> {
        tracing::debug!("Fetching attendance export ({})", self.source.describe());
        let csv_text = self.source.fetch().await?;

        let parsed = read_raw_records(&csv_text)?;
        if parsed.skipped_rows > 0 {
            tracing::warn!(
                "Skipped {} rows that are not attendance records",
                parsed.skipped_rows
            );
        }

        Ok(parsed.records)
    }

    async fn transform(&self, data: Vec<RawAttendanceRecord>) -> Result<TransformResult> {
        let records = self.processor.process_batch(data);
        let rows: Vec<ReportRow> = records.iter().map(|r| self.processor.project(r)).collect();

        let artifacts = build_artifacts(
            &rows,
            self.config.report_filename(),
            self.config.report_title(),
            self.config.report_date(),
            self.config.output_formats(),
        )?;

        Ok(TransformResult { records, artifacts })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let mut output_paths = Vec::with_capacity(result.artifacts.len());

        for artifact in &result.artifacts {
            tracing::debug!(
                "Writing {} ({} bytes)",
                artifact.filename,
                artifact.content.len()
            );
            let written = self
                .storage
                .write_file(&artifact.filename, &artifact.content)
                .await?;
            output_paths.push(written);
        }

        if let Some(first) = result.artifacts.first() {
            tracing::info!("Report ready for delivery: {}", first.subject);
        }

        Ok(output_paths)
    }
}
