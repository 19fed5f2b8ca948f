use crate::domain::ports::ReportSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Downloads the attendance export from the reporting system.
///
/// Credentials are not handled here: whatever the reporting system expects
/// (session cookie, bearer token) is passed in as an opaque header.
pub struct HttpReportSource {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpReportSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout = timeout_seconds.map(Duration::from_secs);
        self
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch(&self) -> Result<String> {
        let mut request = self.client.get(&self.endpoint);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Requesting attendance export from: {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Report source response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::SourceError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes", body.len());
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_sends_configured_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/report")
                .query_param("export", "1")
                .header("Cookie", "sid=abc123");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body("Lithium ID,City\nLI-1,Pune\n");
        });

        let mut headers = HashMap::new();
        headers.insert("Cookie".to_string(), "sid=abc123".to_string());
        let source = HttpReportSource::new(server.url("/report?export=1"))
            .with_headers(headers)
            .with_timeout(Some(5));

        let body = source.fetch().await.unwrap();

        api_mock.assert();
        assert!(body.starts_with("Lithium ID,City"));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/report");
            then.status(401);
        });

        let source = HttpReportSource::new(server.url("/report"));
        let err = source.fetch().await.unwrap_err();

        match err {
            EtlError::SourceError { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
