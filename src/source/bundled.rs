//! Fallback datasets compiled into the binary.
//!
//! Used when no sentiment data API is configured. The documents go through
//! the same validation as remote payloads.

use crate::error::{ReportError, ReportResult};
use crate::models::DataOrigin;
use crate::source::{Dataset, DatasetSource};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

const KEY_METRICS: &str = include_str!("../../fixtures/key-metrics.json");
const ACCUMULATE: &str = include_str!("../../fixtures/accumulate.json");
const RECORDS: &str = include_str!("../../fixtures/records.json");
const TOPICS: &str = include_str!("../../fixtures/topics.json");
const INFLUENCER: &str = include_str!("../../fixtures/influencer.json");

/// Serves the bundled fallback documents.
#[derive(Debug, Clone, Default)]
pub struct BundledSource;

impl BundledSource {
    pub fn new() -> Self {
        Self
    }

    /// Raw text of the bundled document for a dataset.
    pub fn document(dataset: Dataset) -> &'static str {
        match dataset {
            Dataset::KeyMetrics => KEY_METRICS,
            Dataset::Accumulate => ACCUMULATE,
            Dataset::Records => RECORDS,
            Dataset::Topics => TOPICS,
            Dataset::Influencer => INFLUENCER,
        }
    }
}

#[async_trait]
impl DatasetSource for BundledSource {
    async fn fetch(&self, dataset: Dataset) -> ReportResult<Value> {
        debug!("Loading bundled dataset - dataset={}", dataset);
        serde_json::from_str(Self::document(dataset)).map_err(|e| {
            ReportError::validation(dataset, format!("bundled document is not JSON: {}", e))
        })
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Bundled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Influencer, KeyMetrics, SourceSentiment, Topic, TrendRecord};
    use crate::source::fetch_as;

    #[test]
    fn test_every_bundled_document_validates() {
        let source = BundledSource::new();

        tokio_test::block_on(async {
            fetch_as::<KeyMetrics>(&source, Dataset::KeyMetrics)
                .await
                .unwrap();
            let sources = fetch_as::<Vec<SourceSentiment>>(&source, Dataset::Accumulate)
                .await
                .unwrap();
            let records = fetch_as::<Vec<TrendRecord>>(&source, Dataset::Records)
                .await
                .unwrap();
            let topics = fetch_as::<Vec<Topic>>(&source, Dataset::Topics)
                .await
                .unwrap();
            let influencers = fetch_as::<Vec<Influencer>>(&source, Dataset::Influencer)
                .await
                .unwrap();

            assert_eq!(sources.len(), 5);
            assert_eq!(records.len(), 10);
            assert_eq!(topics.len(), 15);
            assert_eq!(influencers.len(), 12);
        });
    }

    #[test]
    fn test_bundled_records_are_chronological() {
        let source = BundledSource::new();
        let records = tokio_test::block_on(fetch_as::<Vec<TrendRecord>>(&source, Dataset::Records))
            .unwrap();

        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_bundled_origin() {
        assert_eq!(BundledSource::new().origin(), DataOrigin::Bundled);
    }
}
