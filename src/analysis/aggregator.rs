//! Concurrent dataset aggregation.
//!
//! All five datasets are requested at once and joined. The first failure
//! aborts the join and drops the fetches still in flight, so a bundle is
//! either complete or not produced at all.

use crate::error::ReportResult;
use crate::models::{Influencer, KeyMetrics, ReportBundle, SourceSentiment, Topic, TrendRecord};
use crate::source::{fetch_as, Dataset, DatasetSource};
use std::time::Instant;
use tracing::{info, warn};

/// Fetch and validate every dataset, returning one bundle.
pub async fn aggregate(source: &dyn DatasetSource) -> ReportResult<ReportBundle> {
    let start = Instant::now();
    info!("Fetching {} datasets from {}", Dataset::ALL.len(), source.origin());

    let result = futures::try_join!(
        fetch_as::<KeyMetrics>(source, Dataset::KeyMetrics),
        fetch_as::<Vec<SourceSentiment>>(source, Dataset::Accumulate),
        fetch_as::<Vec<TrendRecord>>(source, Dataset::Records),
        fetch_as::<Vec<Topic>>(source, Dataset::Topics),
        fetch_as::<Vec<Influencer>>(source, Dataset::Influencer),
    );

    let (key_metrics, sources, trends, topics, influencers) = match result {
        Ok(parts) => parts,
        Err(e) => {
            warn!("Aggregation aborted ({}): {}", e.kind(), e);
            return Err(e);
        }
    };

    info!(
        "Aggregation completed - duration={:.2}s, sources={}, trends={}, topics={}, influencers={}",
        start.elapsed().as_secs_f32(),
        sources.len(),
        trends.len(),
        topics.len(),
        influencers.len()
    );

    Ok(ReportBundle {
        key_metrics,
        sources,
        trends,
        topics,
        influencers,
    })
}
