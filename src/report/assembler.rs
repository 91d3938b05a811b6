//! Final view-model assembly.

use crate::models::{ReportBundle, ReportMetadata, SentimentReport, Summaries};

/// Merge post-processed data and summaries into the report.
pub fn assemble(
    metadata: ReportMetadata,
    data: ReportBundle,
    summaries: Summaries,
) -> SentimentReport {
    SentimentReport {
        metadata,
        data,
        summaries,
    }
}
