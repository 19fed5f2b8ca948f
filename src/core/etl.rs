use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub incomplete_records: usize,
    pub output_paths: Vec<String>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting attendance report run");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} attendance rows", raw_data.len());

        // Transform
        let transformed = self.pipeline.transform(raw_data).await?;
        let records = transformed.records.len();
        let incomplete_records = transformed
            .records
            .iter()
            .filter(|r| r.working_hours.is_none())
            .count();
        tracing::info!(
            "Normalized {} records ({} without working hours)",
            records,
            incomplete_records
        );

        // Load
        let output_paths = self.pipeline.load(transformed).await?;
        for path in &output_paths {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(RunSummary {
            records,
            incomplete_records,
            output_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processor::AttendanceProcessor;
    use crate::domain::model::{RawAttendanceRecord, TransformResult};
    use async_trait::async_trait;

    struct CannedPipeline;

    fn raw(id: &str, check_in: Option<&str>, check_out: Option<&str>) -> RawAttendanceRecord {
        RawAttendanceRecord {
            lithium_id: id.to_string(),
            supervisor_name: "Asha Rao".to_string(),
            attendance_date: "21/03/2024".to_string(),
            primary_campus: "North Campus".to_string(),
            city: "Pune".to_string(),
            check_in_raw: check_in.map(str::to_string),
            check_out_raw: check_out.map(str::to_string),
        }
    }

    #[async_trait]
    impl Pipeline for CannedPipeline {
        async fn extract(&self) -> Result<Vec<RawAttendanceRecord>> {
            Ok(vec![
                raw("LI-1", Some("21/03/2024, 09:00 AM"), Some("21/03/2024, 06:00 PM")),
                raw("LI-2", None, Some("21/03/2024, 06:00 PM")),
                raw("LI-3", Some("21/03/2024, 09:00 AM"), Some("not a time")),
            ])
        }

        async fn transform(&self, data: Vec<RawAttendanceRecord>) -> Result<TransformResult> {
            Ok(TransformResult {
                records: AttendanceProcessor::new().process_batch(data),
                artifacts: vec![],
            })
        }

        async fn load(&self, _result: TransformResult) -> Result<Vec<String>> {
            Ok(vec!["out/report.csv".to_string()])
        }
    }

    #[tokio::test]
    async fn test_run_summary_counts_rows_without_hours() {
        let summary = EtlEngine::new(CannedPipeline).run().await.unwrap();

        assert_eq!(
            summary,
            RunSummary {
                records: 3,
                incomplete_records: 2,
                output_paths: vec!["out/report.csv".to_string()],
            }
        );
    }
}
