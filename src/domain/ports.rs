use crate::domain::model::{OutputFormat, RawAttendanceRecord, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Returns the location the data ended up at.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Where the raw attendance export comes from. Returns the CSV text as exported.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;

    fn describe(&self) -> String;
}

#[async_trait]
impl ReportSource for Box<dyn ReportSource> {
    async fn fetch(&self) -> Result<String> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn report_filename(&self) -> &str;
    fn report_title(&self) -> &str;
    /// Day the report covers, used in the delivery subject.
    fn report_date(&self) -> NaiveDate;
    fn output_formats(&self) -> &[OutputFormat];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawAttendanceRecord>>;
    async fn transform(&self, data: Vec<RawAttendanceRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
