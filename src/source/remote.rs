//! Sentiment data API client.

use crate::error::{ReportError, ReportResult};
use crate::models::DataOrigin;
use crate::source::{Dataset, DatasetSource};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Reads datasets from `<base_url>/sentiment-reports/<tenant>/<dataset>`.
pub struct RemoteSource {
    base_url: String,
    tenant: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(base_url: &str, tenant: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(base_url, tenant, timeout_seconds, http_client))
    }

    /// Build a source around an existing client.
    pub fn with_client(
        base_url: &str,
        tenant: &str,
        timeout_seconds: u64,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant: tenant.to_string(),
            timeout_seconds,
            http_client,
        }
    }

    /// Full URL of a dataset endpoint.
    pub fn url(&self, dataset: Dataset) -> String {
        format!(
            "{}/sentiment-reports/{}/{}",
            self.base_url,
            self.tenant,
            dataset.path()
        )
    }
}

#[async_trait]
impl DatasetSource for RemoteSource {
    async fn fetch(&self, dataset: Dataset) -> ReportResult<Value> {
        let url = self.url(dataset);
        let start = std::time::Instant::now();
        debug!("Fetching dataset - url={}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ReportError::transport(
                    &url,
                    format!("request timed out after {}s", self.timeout_seconds),
                )
            } else if e.is_connect() {
                ReportError::transport(&url, "connection refused")
            } else {
                ReportError::transport(&url, e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::transport(
                &url,
                format!("data API error {}: {}", status, body),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReportError::transport(&url, e.to_string()))?;

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| ReportError::validation(dataset, format!("body is not JSON: {}", e)))?;

        debug!(
            "Fetched dataset - dataset={}, duration={:.2}s, bytes={}",
            dataset,
            start.elapsed().as_secs_f32(),
            body.len()
        );

        Ok(payload)
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_url_layout() {
        let source = RemoteSource::new("http://api.local:9950/", "binance", 5).unwrap();
        assert_eq!(
            source.url(Dataset::KeyMetrics),
            "http://api.local:9950/sentiment-reports/binance/key-metrics"
        );
        assert_eq!(
            source.url(Dataset::Accumulate),
            "http://api.local:9950/sentiment-reports/binance/accumulate"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/sentiment-reports/acme/topics");
                then.status(200).json_body(json!([{"topic": "fees"}]));
            })
            .await;

        let source = RemoteSource::new(&server.base_url(), "acme", 5).unwrap();
        let payload = source.fetch(Dataset::Topics).await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload, json!([{"topic": "fees"}]));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/sentiment-reports/acme/records");
                then.status(503).body("maintenance");
            })
            .await;

        let source = RemoteSource::new(&server.base_url(), "acme", 5).unwrap();
        let err = source.fetch(Dataset::Records).await.unwrap_err();

        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_validation_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/sentiment-reports/acme/influencer");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let source = RemoteSource::new(&server.base_url(), "acme", 5).unwrap();
        let err = source.fetch(Dataset::Influencer).await.unwrap_err();

        assert!(matches!(
            err,
            ReportError::Validation {
                dataset: Dataset::Influencer,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let source = RemoteSource::new("http://127.0.0.1:1", "acme", 2).unwrap();
        let err = source.fetch(Dataset::KeyMetrics).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
