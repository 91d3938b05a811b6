//! Presentation reshaping of aggregated datasets.
//!
//! Pure functions: no I/O and no failure modes. Sorting is stable, so rows
//! with equal keys keep their arrival order.

use crate::config::ReportConfig;
use crate::models::{Influencer, ReportBundle, Topic};

/// Caps applied while reshaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Topics kept after sorting by total.
    pub top_topics: usize,
    /// Influencers kept after sorting by influence.
    pub top_influencers: usize,
    /// Keywords kept per polarity on each topic.
    pub max_keywords: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            top_topics: 10,
            top_influencers: 10,
            max_keywords: 5,
        }
    }
}

impl From<&ReportConfig> for Limits {
    fn from(config: &ReportConfig) -> Self {
        Self {
            top_topics: config.top_topics,
            top_influencers: config.top_influencers,
            max_keywords: config.max_keywords,
        }
    }
}

/// Apply every per-dataset rule to a bundle.
///
/// Key metrics, sources and trends pass through unchanged.
pub fn postprocess(bundle: ReportBundle, limits: &Limits) -> ReportBundle {
    ReportBundle {
        topics: top_topics(bundle.topics, limits.top_topics, limits.max_keywords),
        influencers: top_influencers(bundle.influencers, limits.top_influencers),
        ..bundle
    }
}

/// Highest-volume topics first, with keyword lists capped.
pub fn top_topics(mut topics: Vec<Topic>, n: usize, max_keywords: usize) -> Vec<Topic> {
    topics.sort_by(|a, b| b.total.total_cmp(&a.total));
    topics.truncate(n);

    for topic in &mut topics {
        topic.positive_keywords.truncate(max_keywords);
        topic.negative_keywords.truncate(max_keywords);
    }

    topics
}

/// Most influential accounts first.
pub fn top_influencers(mut influencers: Vec<Influencer>, n: usize) -> Vec<Influencer> {
    influencers.sort_by(|a, b| b.influence.total_cmp(&a.influence));
    influencers.truncate(n);
    influencers
}
