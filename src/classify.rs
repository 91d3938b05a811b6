//! Single-text sentiment classification.
//!
//! The model must answer with one of the three polarities. Any other
//! answer is a generation failure, never a guess. Labelled cases can be
//! loaded from a TOML file and scored by exact match.

use crate::error::{ReportError, ReportResult};
use crate::models::Polarity;
use crate::summary::TextGenerator;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Stage name used in errors and logs.
pub const CLASSIFY_STAGE: &str = "sentiment classification";

pub const CLASSIFY_SYSTEM_PROMPT: &str = "Classify the sentiment of the text. \
Answer with exactly one word: positive, negative or neutral.";

/// Map a model answer onto a polarity.
///
/// Case, surrounding whitespace, quotes and trailing punctuation are
/// ignored. Anything else returns `None`.
pub fn parse_polarity(answer: &str) -> Option<Polarity> {
    let word = answer
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '*' || c == '.')
        .to_lowercase();

    match word.as_str() {
        "positive" => Some(Polarity::Positive),
        "negative" => Some(Polarity::Negative),
        "neutral" => Some(Polarity::Neutral),
        _ => None,
    }
}

/// Classify the sentiment of `text`.
pub async fn classify_sentiment(
    generator: &dyn TextGenerator,
    text: &str,
) -> ReportResult<Polarity> {
    let answer = generator
        .generate(CLASSIFY_STAGE, CLASSIFY_SYSTEM_PROMPT, text)
        .await?;

    parse_polarity(&answer).ok_or_else(|| {
        ReportError::generation(
            CLASSIFY_STAGE,
            format!("expected positive, negative or neutral, got {:?}", answer),
        )
    })
}

/// A labelled classification example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyCase {
    pub input: String,
    pub expected: Polarity,
}

/// Load labelled cases from a TOML file.
///
/// Two layouts are accepted: a `[[tests]]` array, or one table per case
/// (`[case1]`, `[case2]`, ...) each holding `input` and `expected`.
pub fn load_cases(path: &Path) -> anyhow::Result<Vec<ClassifyCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cases file: {}", path.display()))?;
    parse_cases(&content).with_context(|| format!("Invalid cases file: {}", path.display()))
}

fn parse_cases(content: &str) -> anyhow::Result<Vec<ClassifyCase>> {
    let table: toml::Table = toml::from_str(content)?;

    let cases = match table.get("tests") {
        Some(toml::Value::Array(tests)) => tests
            .iter()
            .cloned()
            .map(|value| value.try_into::<ClassifyCase>())
            .collect::<Result<Vec<_>, _>>()?,
        _ => table
            .values()
            .filter(|value| {
                value
                    .as_table()
                    .is_some_and(|t| t.contains_key("input") && t.contains_key("expected"))
            })
            .cloned()
            .map(|value| value.try_into::<ClassifyCase>())
            .collect::<Result<Vec<_>, _>>()?,
    };

    if cases.is_empty() {
        bail!("no cases with `input` and `expected` found");
    }
    Ok(cases)
}

/// Result of one labelled case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    pub input: String,
    pub expected: Polarity,
    pub actual: Polarity,
}

impl CaseOutcome {
    pub fn is_match(&self) -> bool {
        self.expected == self.actual
    }
}

/// Exact-match results over a set of cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalSummary {
    pub outcomes: Vec<CaseOutcome>,
}

impl EvalSummary {
    pub fn matched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_match()).count()
    }

    /// Share of exact matches, 0.0 for an empty run.
    pub fn score(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.matched() as f64 / self.outcomes.len() as f64
        }
    }
}

/// Classify every case concurrently and score the answers.
///
/// An answer outside the three polarities fails the whole run.
pub async fn run_cases(
    generator: &dyn TextGenerator,
    cases: &[ClassifyCase],
) -> ReportResult<EvalSummary> {
    info!("Classifying {} labelled cases", cases.len());

    let outcomes = futures::future::try_join_all(cases.iter().map(|case| async move {
        let actual = classify_sentiment(generator, &case.input).await?;
        debug!("Classified case - expected={}, actual={}", case.expected, actual);
        Ok::<_, ReportError>(CaseOutcome {
            input: case.input.clone(),
            expected: case.expected,
            actual,
        })
    }))
    .await?;

    let summary = EvalSummary { outcomes };
    info!(
        "Classification eval completed - matched={}/{}",
        summary.matched(),
        summary.outcomes.len()
    );
    Ok(summary)
}
