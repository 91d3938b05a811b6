//! Markdown and JSON report generation.
//!
//! This module renders an assembled [`SentimentReport`] as a Markdown
//! document or as pretty-printed JSON.

use crate::models::{
    Influencer, KeyMetrics, Metric, ReportBundle, ReportMetadata, SentimentReport,
    SourceSentiment, Topic, TrendRecord,
};
use crate::report::format::{compact, percent, signed_percent};
use crate::summary::prompts::Section;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &SentimentReport) -> String {
    let mut output = String::new();
    let summaries = &report.summaries;

    output.push_str(&format!(
        "# Sentiment Analysis Report: {}\n\n",
        report.metadata.tenant
    ));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents());
    output.push_str(&generate_overview_section(&summaries.comprehensive));

    output.push_str(&section_header(Section::KeyMetrics, &summaries.key_metrics));
    output.push_str(&generate_key_metrics_table(&report.data.key_metrics));

    output.push_str(&section_header(Section::Sources, &summaries.sources));
    output.push_str(&generate_sources_table(&report.data.sources));

    output.push_str(&section_header(Section::Trends, &summaries.trends));
    output.push_str(&generate_trends_table(&report.data.trends));

    output.push_str(&section_header(Section::Topics, &summaries.topics));
    output.push_str(&generate_topics_table(&report.data.topics));

    output.push_str(&section_header(Section::Influencer, &summaries.influencer));
    output.push_str(&generate_influencer_table(&report.data.influencers));

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Tenant:** {}\n", metadata.tenant));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Model Used:** `{}`\n", metadata.model_used));
    section.push_str(&format!("- **Data Source:** {}\n", metadata.data_origin));
    section.push_str(&format!(
        "- **Build Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents() -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Overview](#overview)\n");
    for section in Section::ALL {
        let anchor = section.title().to_lowercase().replace(' ', "-");
        toc.push_str(&format!("- [{}](#{})\n", section.title(), anchor));
    }
    toc.push('\n');

    toc
}

/// Generate the overview section from the comprehensive summary.
fn generate_overview_section(overview: &str) -> String {
    if overview.is_empty() {
        return String::new();
    }

    format!("## Overview\n\n{}\n\n", overview)
}

fn section_header(section: Section, summary: &str) -> String {
    let mut header = format!("## {}\n\n", section.title());
    if !summary.is_empty() {
        header.push_str(&format!("> {}\n\n", summary.replace('\n', "\n> ")));
    }
    header
}

fn metric_row(label: &str, metric: &Metric) -> String {
    format!(
        "| {} | {} | {} | {} {} |\n",
        label,
        compact(metric.value),
        signed_percent(metric.percent_change),
        metric.trend.arrow(),
        metric.trend
    )
}

fn generate_key_metrics_table(metrics: &KeyMetrics) -> String {
    let mut table = String::new();
    let tweets = &metrics.total_tweets;

    table.push_str("| Metric | Value | Change | Trend |\n");
    table.push_str("|:---|---:|---:|:---:|\n");
    table.push_str(&format!(
        "| Total Tweets (since {}) | {} | {} | {} {} |\n",
        tweets.start_date,
        compact(tweets.value),
        signed_percent(tweets.percent_change),
        tweets.trend.arrow(),
        tweets.trend
    ));
    table.push_str(&metric_row("Average Retweets", &metrics.average_retweets));
    table.push_str(&metric_row("Average Likes", &metrics.average_likes));
    table.push_str(&metric_row("Average Replies", &metrics.average_replies));
    table.push('\n');

    table
}

fn generate_sources_table(sources: &[SourceSentiment]) -> String {
    if sources.is_empty() {
        return "No source data available.\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| Source | Positive | Negative | Neutral | Mentions |\n");
    table.push_str("|:---|---:|---:|---:|---:|\n");

    for row in sources {
        let share = row.share();
        table.push_str(&format!(
            "| {} | {} ({}) | {} ({}) | {} ({}) | {} |\n",
            row.source,
            compact(row.positive),
            percent(share.positive),
            compact(row.negative),
            percent(share.negative),
            compact(row.neutral),
            percent(share.neutral),
            compact(row.total())
        ));
    }
    table.push('\n');

    table
}

fn generate_trends_table(trends: &[TrendRecord]) -> String {
    if trends.is_empty() {
        return "No trend data available.\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| Date | Positive | Negative | Neutral |\n");
    table.push_str("|:---|---:|---:|---:|\n");

    for record in trends {
        table.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            record.date,
            compact(record.positive),
            compact(record.negative),
            compact(record.neutral)
        ));
    }
    table.push('\n');

    table
}

fn generate_topics_table(topics: &[Topic]) -> String {
    if topics.is_empty() {
        return "No topic data available.\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| Topic | Mentions | Positive | Negative | Positive Keywords | Negative Keywords |\n");
    table.push_str("|:---|---:|---:|---:|:---|:---|\n");

    for topic in topics {
        let share = topic.share();
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            topic.topic,
            compact(topic.total),
            percent(share.positive),
            percent(share.negative),
            topic.positive_keywords.join(", "),
            topic.negative_keywords.join(", ")
        ));
    }
    table.push('\n');

    table
}

fn generate_influencer_table(influencers: &[Influencer]) -> String {
    if influencers.is_empty() {
        return "No influencer data available.\n\n".to_string();
    }

    let mut table = String::new();
    table.push_str("| # | Account | Source | Influence | Sentiment |\n");
    table.push_str("|:---:|:---|:---|---:|:---|\n");

    for (i, influencer) in influencers.iter().enumerate() {
        let polarity = influencer.polarity();
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} {} ({}) |\n",
            i + 1,
            influencer.name,
            influencer.source,
            compact(influencer.influence),
            polarity.emoji(),
            polarity,
            percent(influencer.sentiment)
        ));
    }
    table.push('\n');

    table
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by Sentilens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SentimentReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render the post-processed datasets alone, as printed by a dry run.
///
/// The output is a single JSON document and nothing else.
pub fn generate_data_json(data: &ReportBundle) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DataOrigin, Metric, ReportBundle, Summaries, Trend, TweetVolume,
    };
    use chrono::{NaiveDate, Utc};

    fn metric(value: f64, change: f64, trend: Trend) -> Metric {
        Metric {
            value,
            percent_change: change,
            trend,
        }
    }

    fn create_test_report() -> SentimentReport {
        SentimentReport {
            metadata: ReportMetadata {
                tenant: "binance".to_string(),
                generated_at: Utc::now(),
                model_used: "test-model".to_string(),
                data_origin: DataOrigin::Bundled,
                duration_seconds: 4.2,
            },
            data: ReportBundle {
                key_metrics: KeyMetrics {
                    total_tweets: TweetVolume {
                        value: 128_450.0,
                        percent_change: 12.4,
                        trend: Trend::Up,
                        start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                    },
                    average_retweets: metric(36.8, -4.1, Trend::Down),
                    average_likes: metric(212.5, 7.9, Trend::Up),
                    average_replies: metric(14.2, 0.0, Trend::Neutral),
                },
                sources: vec![SourceSentiment {
                    source: "x.com".to_string(),
                    positive: 1000.0,
                    negative: 5000.0,
                    neutral: 700.0,
                }],
                trends: vec![TrendRecord {
                    date: "2025-04-01".to_string(),
                    positive: 320.0,
                    negative: 610.0,
                    neutral: 270.0,
                }],
                topics: vec![Topic {
                    topic: "Withdrawal delays".to_string(),
                    positive: 120.0,
                    negative: 980.0,
                    neutral: 200.0,
                    total: 1300.0,
                    positive_keywords: vec!["refund".to_string()],
                    negative_keywords: vec!["stuck".to_string(), "pending".to_string()],
                }],
                influencers: vec![Influencer {
                    name: "@cryptowhale".to_string(),
                    influence: 680.0,
                    sentiment: -0.42,
                    source: "x.com".to_string(),
                }],
            },
            summaries: Summaries {
                key_metrics: "Volume grew while retweets fell.".to_string(),
                sources: "x.com is the most negative platform.".to_string(),
                trends: "Negativity peaked on April 6.".to_string(),
                topics: "Withdrawal delays dominate.".to_string(),
                influencer: "A few critical accounts lead.".to_string(),
                comprehensive: "Sentiment is predominantly negative.".to_string(),
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Sentiment Analysis Report: binance"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Overview\n\nSentiment is predominantly negative."));
        assert!(markdown.contains("> x.com is the most negative platform."));
        assert!(markdown.contains("## Top Influencers"));
        assert!(markdown.contains("stuck, pending"));
    }

    #[test]
    fn test_sections_follow_report_order() {
        let markdown = generate_markdown_report(&create_test_report());

        let positions: Vec<usize> = Section::ALL
            .iter()
            .map(|s| markdown.find(&format!("## {}\n", s.title())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sources_table_shows_shares() {
        let table = generate_sources_table(&create_test_report().data.sources);
        assert!(table.contains("| x.com | 1K (14.93%) | 5K (74.63%) | 700 (10.45%) | 6.7K |"));
    }

    #[test]
    fn test_key_metrics_table() {
        let table = generate_key_metrics_table(&create_test_report().data.key_metrics);
        assert!(table.contains("Total Tweets (since 2025-04-01) | 128K | +12.4% | ▲ up"));
        assert!(table.contains("| Average Retweets | 36.8 | -4.1% | ▼ down |"));
    }

    #[test]
    fn test_influencer_polarity_rendered() {
        let table = generate_influencer_table(&create_test_report().data.influencers);
        assert!(table.contains("🔴 Negative (-42%)"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"tenant\""));
        assert!(json.contains("\"comprehensive\""));
        assert!(json.contains("\"totalTweets\""));
        assert!(json.contains("\"data_origin\": \"bundled\""));
    }

    #[test]
    fn test_generate_data_json_is_plain_json() {
        let data = create_test_report().data;
        let json = generate_data_json(&data).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("key_metrics").is_some());
        assert!(parsed.get("metadata").is_none());

        let round_trip: ReportBundle = serde_json::from_value(parsed).unwrap();
        assert_eq!(round_trip, data);
    }
}
