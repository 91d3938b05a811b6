//! The "build report" operation.
//!
//! Aggregate, reshape, summarize, assemble. Data failures surface before
//! any generation call is made.

use crate::analysis::{aggregate, postprocess, Limits};
use crate::error::ReportResult;
use crate::models::{ReportBundle, ReportMetadata, SentimentReport};
use crate::report::assemble;
use crate::source::DatasetSource;
use crate::summary::{summarize, TextGenerator};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

/// Everything needed to build one tenant's report.
pub struct ReportPipeline<'a> {
    source: &'a dyn DatasetSource,
    generator: &'a dyn TextGenerator,
    tenant: String,
    model_name: String,
    limits: Limits,
}

impl<'a> ReportPipeline<'a> {
    pub fn new(
        source: &'a dyn DatasetSource,
        generator: &'a dyn TextGenerator,
        tenant: impl Into<String>,
        model_name: impl Into<String>,
        limits: Limits,
    ) -> Self {
        Self {
            source,
            generator,
            tenant: tenant.into(),
            model_name: model_name.into(),
            limits,
        }
    }

    /// Aggregate and reshape the datasets without generating summaries.
    pub async fn build_data(&self) -> ReportResult<ReportBundle> {
        let bundle = aggregate(self.source).await?;
        Ok(postprocess(bundle, &self.limits))
    }

    /// Build the complete report.
    pub async fn build_report(&self) -> ReportResult<SentimentReport> {
        let start = Instant::now();
        info!("Building sentiment report for {}", self.tenant);

        let data = self.build_data().await?;
        let summaries = summarize(self.generator, &data).await?;

        let metadata = ReportMetadata {
            tenant: self.tenant.clone(),
            generated_at: Utc::now(),
            model_used: self.model_name.clone(),
            data_origin: self.source.origin(),
            duration_seconds: start.elapsed().as_secs_f64(),
        };

        info!(
            "Report built - tenant={}, duration={:.2}s",
            self.tenant, metadata.duration_seconds
        );

        Ok(assemble(metadata, data, summaries))
    }
}
