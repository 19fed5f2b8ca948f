// Adapters layer: concrete report sources and storage backends.

pub mod file;
pub mod http;
pub mod storage;

use crate::config::SourceSpec;
use crate::domain::ports::ReportSource;

pub use file::FileReportSource;
pub use http::HttpReportSource;
pub use storage::LocalStorage;

pub fn build_source(spec: &SourceSpec) -> Box<dyn ReportSource> {
    match spec {
        SourceSpec::Http {
            endpoint,
            headers,
            timeout_seconds,
        } => Box::new(
            HttpReportSource::new(endpoint.clone())
                .with_headers(headers.clone())
                .with_timeout(*timeout_seconds),
        ),
        SourceSpec::File { path } => Box::new(FileReportSource::new(path)),
    }
}
