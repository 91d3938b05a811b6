//! Prompt text for section summaries and the final synthesis.

use std::fmt;

/// One summarized section of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    KeyMetrics,
    Sources,
    Trends,
    Topics,
    Influencer,
}

impl Section {
    /// Sections in report order.
    pub const ALL: [Section; 5] = [
        Section::KeyMetrics,
        Section::Sources,
        Section::Trends,
        Section::Topics,
        Section::Influencer,
    ];

    /// Heading used in the synthesis prompt and rendered reports.
    pub fn title(&self) -> &'static str {
        match self {
            Section::KeyMetrics => "Key Metrics",
            Section::Sources => "Sentiment by Sources",
            Section::Trends => "Sentiment Trends",
            Section::Topics => "Topics",
            Section::Influencer => "Top Influencers",
        }
    }

    /// What the section data represents, given to the model ahead of the data.
    pub fn preamble(&self) -> &'static str {
        match self {
            Section::KeyMetrics => {
                "Key performance metrics for the sentiment report: total tweets and average \
                 retweets, likes and replies, each with its percent change and trend direction."
            }
            Section::Sources => {
                "Accumulated sentiment counts (positive, negative, neutral) grouped by the \
                 platform the mentions came from."
            }
            Section::Trends => {
                "Daily sentiment counts in chronological order, showing how positive, negative \
                 and neutral mentions moved over the report period."
            }
            Section::Topics => {
                "The most discussed topics by mention volume, with sentiment counts and the \
                 leading positive and negative keywords for each topic."
            }
            Section::Influencer => {
                "The most influential accounts in the conversation, with their influence score, \
                 signed sentiment score and source platform."
            }
        }
    }

    /// Stage name used in logs and errors.
    pub fn stage(&self) -> String {
        format!("{} summary", self.title().to_lowercase())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// System instructions for a section summary.
pub const SECTION_SYSTEM_PROMPT: &str = r#"Analyze the provided data and write a clear, concise summary.

## Steps

1. Review the data to understand its structure, fields and any visible patterns.
2. Pick out the most significant information: trends, anomalies, correlations and notable figures.
3. Write a short paragraph that communicates those insights.

## Output

A single short paragraph of plain prose. No lists, no headings, no JSON."#;

/// System instructions for the cross-section synthesis.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You receive summaries of the individual sections of a social media sentiment report.
Synthesize a high-level overview of the overall sentiment picture.

Connect the sections where they explain each other, call out the single most important
takeaway first, and keep it to one paragraph of plain prose."#;

/// Build the prompt for one section from its serialized data.
pub fn section_prompt(section: Section, data_json: &str) -> String {
    format!("{}\n'''\n{}\n'''", section.preamble(), data_json)
}

/// Build the synthesis prompt from the section summaries, in report order.
pub fn synthesis_prompt(summaries: &[(Section, &str)]) -> String {
    let mut prompt = String::from("Section summaries of the sentiment report:\n\n");

    for (section, summary) in summaries {
        prompt.push_str(&format!("## {}\n{}\n\n", section.title(), summary));
    }

    prompt.push_str("Write the overview now:");
    prompt
}
