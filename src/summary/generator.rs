//! Two-tier summary generation.
//!
//! The five section summaries are requested concurrently. The synthesis
//! call only starts once all five have returned, and any failure aborts the
//! whole stage.

use crate::error::{ReportError, ReportResult};
use crate::models::{ReportBundle, Summaries};
use crate::summary::client::TextGenerator;
use crate::summary::prompts::{
    section_prompt, synthesis_prompt, Section, SECTION_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
use std::time::Instant;
use tracing::{debug, info};

/// Stage name of the synthesis call.
pub const SYNTHESIS_STAGE: &str = "comprehensive summary";

/// Serialize the post-processed data of one section.
pub fn section_data(bundle: &ReportBundle, section: Section) -> ReportResult<String> {
    let json = match section {
        Section::KeyMetrics => serde_json::to_string(&bundle.key_metrics),
        Section::Sources => serde_json::to_string(&bundle.sources),
        Section::Trends => serde_json::to_string(&bundle.trends),
        Section::Topics => serde_json::to_string(&bundle.topics),
        Section::Influencer => serde_json::to_string(&bundle.influencers),
    };

    json.map_err(|e| ReportError::generation(section.stage(), e.to_string()))
}

/// Summarize one section.
pub async fn summarize_section(
    generator: &dyn TextGenerator,
    bundle: &ReportBundle,
    section: Section,
) -> ReportResult<String> {
    let start = Instant::now();
    let prompt = section_prompt(section, &section_data(bundle, section)?);

    let summary = generator
        .generate(&section.stage(), SECTION_SYSTEM_PROMPT, &prompt)
        .await?;

    debug!(
        "Section summary ready - section={}, duration={:.2}s, chars={}",
        section,
        start.elapsed().as_secs_f32(),
        summary.len()
    );
    Ok(summary)
}

/// Produce every section summary, then the comprehensive one.
pub async fn summarize(
    generator: &dyn TextGenerator,
    bundle: &ReportBundle,
) -> ReportResult<Summaries> {
    let start = Instant::now();
    info!(
        "Generating summaries - sections={}, total_llm_calls={}",
        Section::ALL.len(),
        Section::ALL.len() + 1
    );

    let (key_metrics, sources, trends, topics, influencer) = futures::try_join!(
        summarize_section(generator, bundle, Section::KeyMetrics),
        summarize_section(generator, bundle, Section::Sources),
        summarize_section(generator, bundle, Section::Trends),
        summarize_section(generator, bundle, Section::Topics),
        summarize_section(generator, bundle, Section::Influencer),
    )?;

    info!(
        "Section summaries completed - duration={:.2}s",
        start.elapsed().as_secs_f32()
    );

    let prompt = synthesis_prompt(&[
        (Section::KeyMetrics, key_metrics.as_str()),
        (Section::Sources, sources.as_str()),
        (Section::Trends, trends.as_str()),
        (Section::Topics, topics.as_str()),
        (Section::Influencer, influencer.as_str()),
    ]);

    let comprehensive = generator
        .generate(SYNTHESIS_STAGE, SYNTHESIS_SYSTEM_PROMPT, &prompt)
        .await?;

    info!(
        "Summary generation completed - duration={:.2}s",
        start.elapsed().as_secs_f32()
    );

    Ok(Summaries {
        key_metrics,
        sources,
        trends,
        topics,
        influencer,
        comprehensive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{aggregate, postprocess, Limits};
    use crate::source::BundledSource;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    async fn bundled() -> ReportBundle {
        let bundle = aggregate(&BundledSource::new()).await.unwrap();
        postprocess(bundle, &Limits::default())
    }

    /// Records start/end events; one stage is slowed down.
    struct RecordingGenerator {
        slow_stage: String,
        events: Mutex<Vec<String>>,
    }

    impl RecordingGenerator {
        fn new(slow_stage: String) -> Self {
            Self {
                slow_stage,
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, stage: &str, _system: &str, _prompt: &str) -> ReportResult<String> {
            self.events.lock().unwrap().push(format!("start:{}", stage));
            if stage == self.slow_stage {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            self.events.lock().unwrap().push(format!("end:{}", stage));
            Ok(format!("summary of {}", stage))
        }
    }

    /// Fails for one stage and counts calls.
    struct FailingGenerator {
        failing_stage: String,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, stage: &str, _system: &str, _prompt: &str) -> ReportResult<String> {
            self.calls.lock().unwrap().push(stage.to_string());
            if stage == self.failing_stage {
                return Err(ReportError::generation(stage, "model overloaded"));
            }
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_synthesis_waits_for_slow_section() {
        let bundle = bundled().await;
        let slow = Section::Trends.stage();
        let generator = RecordingGenerator::new(slow.clone());

        let summaries = summarize(&generator, &bundle).await.unwrap();
        let events = generator.events();

        let slow_end = events
            .iter()
            .position(|e| *e == format!("end:{}", slow))
            .unwrap();
        let synthesis_start = events
            .iter()
            .position(|e| *e == format!("start:{}", SYNTHESIS_STAGE))
            .unwrap();

        assert!(slow_end < synthesis_start, "events: {:?}", events);
        assert_eq!(events.len(), 12);
        assert_eq!(summaries.trends, format!("summary of {}", slow));
        assert_eq!(
            summaries.comprehensive,
            format!("summary of {}", SYNTHESIS_STAGE)
        );
    }

    #[tokio::test]
    async fn test_sections_start_before_any_finishes() {
        let bundle = bundled().await;
        let generator = RecordingGenerator::new(Section::KeyMetrics.stage());

        summarize(&generator, &bundle).await.unwrap();
        let events = generator.events();

        // All five section calls are in flight before the slow one completes.
        let starts_before_slow_end = events
            .iter()
            .take_while(|e| **e != format!("end:{}", Section::KeyMetrics.stage()))
            .filter(|e| e.starts_with("start:"))
            .count();
        assert_eq!(starts_before_slow_end, 5);
    }

    #[tokio::test]
    async fn test_section_failure_skips_synthesis() {
        let bundle = bundled().await;
        let generator = FailingGenerator {
            failing_stage: Section::Topics.stage(),
            calls: Mutex::new(Vec::new()),
        };

        let err = summarize(&generator, &bundle).await.unwrap_err();

        assert_eq!(err.kind(), "generation");
        let calls = generator.calls.lock().unwrap();
        assert!(!calls.iter().any(|c| c == SYNTHESIS_STAGE));
    }

    #[tokio::test]
    async fn test_synthesis_failure_fails_stage() {
        let bundle = bundled().await;
        let generator = FailingGenerator {
            failing_stage: SYNTHESIS_STAGE.to_string(),
            calls: Mutex::new(Vec::new()),
        };

        let err = summarize(&generator, &bundle).await.unwrap_err();
        assert!(err.to_string().contains(SYNTHESIS_STAGE));
        assert_eq!(generator.calls.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_section_data_uses_postprocessed_rows() {
        let bundle = bundled().await;
        let json = section_data(&bundle, Section::Topics).unwrap();
        let topics: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(topics.len(), 10);
        assert_eq!(topics[0]["topic"], "Regulation");
        assert!(!json.contains("Web3 wallet"));
    }
}
