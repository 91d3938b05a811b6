//! Data models for sentiment reports.
//!
//! This module contains the value objects produced for every report:
//! the five dataset shapes, the summaries written by the model, and the
//! assembled report handed to the renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a key metric compared to the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

impl Trend {
    /// Returns an arrow representation of the trend.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Neutral => "▬",
        }
    }
}

/// A single key metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub value: f64,
    pub percent_change: f64,
    pub trend: Trend,
}

/// Tweet volume metric, which also records when counting started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetVolume {
    pub value: f64,
    pub percent_change: f64,
    pub trend: Trend,
    pub start_date: NaiveDate,
}

/// Headline engagement figures for the report period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_tweets: TweetVolume,
    pub average_retweets: Metric,
    pub average_likes: Metric,
    pub average_replies: Metric,
}

/// Sentiment counts accumulated for one source platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSentiment {
    pub source: String,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Percent form of a [`SourceSentiment`] row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceShare {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SourceSentiment {
    /// Sum of the three counts.
    pub fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Share of each sentiment relative to the row total.
    ///
    /// A row with no mentions yields zero for every share.
    pub fn share(&self) -> SourceShare {
        let total = self.total();
        SourceShare {
            positive: ratio(self.positive, total),
            negative: ratio(self.negative, total),
            neutral: ratio(self.neutral, total),
        }
    }
}

/// Daily sentiment counts. Records are kept in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub date: String,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Sentiment counts and keywords for one discussion topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub total: f64,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
}

/// Percent form of a [`Topic`] row, relative to its `total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopicShare {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl Topic {
    pub fn share(&self) -> TopicShare {
        TopicShare {
            positive: ratio(self.positive, self.total),
            negative: ratio(self.negative, self.total),
            neutral: ratio(self.neutral, self.total),
        }
    }
}

/// Polarity of an influencer's sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "Positive"),
            Polarity::Negative => write!(f, "Negative"),
            Polarity::Neutral => write!(f, "Neutral"),
        }
    }
}

impl Polarity {
    /// Classify a signed sentiment score.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Polarity::Positive
        } else if score < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    /// Returns an emoji representation of the polarity.
    pub fn emoji(&self) -> &'static str {
        match self {
            Polarity::Positive => "🟢",
            Polarity::Negative => "🔴",
            Polarity::Neutral => "🔵",
        }
    }
}

/// An account with measurable influence on the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub name: String,
    pub influence: f64,
    /// Signed sentiment score; the sign gives the polarity.
    pub sentiment: f64,
    pub source: String,
}

impl Influencer {
    pub fn polarity(&self) -> Polarity {
        Polarity::from_score(self.sentiment)
    }
}

/// The five datasets that make up a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub key_metrics: KeyMetrics,
    pub sources: Vec<SourceSentiment>,
    pub trends: Vec<TrendRecord>,
    pub topics: Vec<Topic>,
    pub influencers: Vec<Influencer>,
}

/// Narrative summaries written by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summaries {
    pub key_metrics: String,
    pub sources: String,
    pub trends: String,
    pub topics: String,
    pub influencer: String,
    /// Overview synthesized from the five section summaries.
    pub comprehensive: String,
}

/// Where the report data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Live sentiment data API.
    Remote,
    /// Datasets compiled into the binary.
    Bundled,
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Remote => write!(f, "remote API"),
            DataOrigin::Bundled => write!(f, "bundled datasets"),
        }
    }
}

/// Metadata about the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Subject of the report, e.g. a brand name.
    pub tenant: String,
    /// Date and time the report was built.
    pub generated_at: DateTime<Utc>,
    /// Name of the LLM model used for summaries.
    pub model_used: String,
    /// Origin of the datasets.
    pub data_origin: DataOrigin,
    /// Time spent building the report in seconds.
    pub duration_seconds: f64,
}

/// The complete sentiment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub metadata: ReportMetadata,
    pub data: ReportBundle,
    pub summaries: Summaries,
}

fn ratio(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total
    }
}
