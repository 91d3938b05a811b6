//! Dataset sources.
//!
//! A report is built from five datasets. They are read either from the
//! sentiment data API or, when no backend is configured, from fallback
//! documents compiled into the binary. Both paths hand back raw JSON that
//! is validated by [`decode`], so the two modes behave the same.

pub mod bundled;
pub mod remote;

pub use bundled::BundledSource;
pub use remote::RemoteSource;

use crate::config::BackendConfig;
use crate::error::{ReportError, ReportResult};
use crate::models::DataOrigin;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::info;

/// The five datasets a report is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    KeyMetrics,
    Accumulate,
    Records,
    Topics,
    Influencer,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::KeyMetrics,
        Dataset::Accumulate,
        Dataset::Records,
        Dataset::Topics,
        Dataset::Influencer,
    ];

    /// Path segment used by the data API.
    pub fn path(&self) -> &'static str {
        match self {
            Dataset::KeyMetrics => "key-metrics",
            Dataset::Accumulate => "accumulate",
            Dataset::Records => "records",
            Dataset::Topics => "topics",
            Dataset::Influencer => "influencer",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Something that can produce the raw payload of a dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the unvalidated JSON payload for `dataset`.
    async fn fetch(&self, dataset: Dataset) -> ReportResult<Value>;

    fn origin(&self) -> DataOrigin;
}

/// Validate a payload against the typed schema of a dataset.
pub fn decode<T: DeserializeOwned>(dataset: Dataset, payload: Value) -> ReportResult<T> {
    serde_json::from_value(payload).map_err(|e| ReportError::validation(dataset, e.to_string()))
}

/// Fetch a dataset and validate it in one step.
pub async fn fetch_as<T: DeserializeOwned>(
    source: &dyn DatasetSource,
    dataset: Dataset,
) -> ReportResult<T> {
    let payload = source.fetch(dataset).await?;
    decode(dataset, payload)
}

/// Pick the dataset source once, based on whether a backend is configured.
pub fn from_config(backend: &BackendConfig) -> anyhow::Result<Box<dyn DatasetSource>> {
    match backend.base_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            info!("Using sentiment data API at {}", url);
            let source = RemoteSource::new(url, &backend.tenant, backend.timeout_seconds)?;
            Ok(Box::new(source))
        }
        _ => {
            info!("No backend configured, using bundled datasets");
            Ok(Box::new(BundledSource::new()))
        }
    }
}
