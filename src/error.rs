//! Error taxonomy for report builds.
//!
//! Every stage of the pipeline propagates one of three failure kinds
//! without local recovery. The binary wraps them in `anyhow` at the edge.

use crate::source::Dataset;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A payload did not match the expected shape.
    #[error("invalid `{dataset}` payload: {message}")]
    Validation { dataset: Dataset, message: String },

    /// The data API or the model endpoint could not be reached.
    #[error("cannot reach {target}: {message}")]
    Transport { target: String, message: String },

    /// The model returned an error or an unusable answer.
    #[error("text generation failed for {stage}: {message}")]
    Generation { stage: String, message: String },
}

impl ReportError {
    pub fn validation(dataset: Dataset, message: impl Into<String>) -> Self {
        ReportError::Validation {
            dataset,
            message: message.into(),
        }
    }

    pub fn transport(target: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::Transport {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn generation(stage: impl Into<String>, message: impl Into<String>) -> Self {
        ReportError::Generation {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Short name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Validation { .. } => "validation",
            ReportError::Transport { .. } => "transport",
            ReportError::Generation { .. } => "generation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ReportError::validation(Dataset::Topics, "missing field").kind(),
            "validation"
        );
        assert_eq!(
            ReportError::transport("http://localhost:8090", "refused").kind(),
            "transport"
        );
        assert_eq!(
            ReportError::generation("synthesis", "empty answer").kind(),
            "generation"
        );
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let err = ReportError::validation(Dataset::KeyMetrics, "missing field `trend`");
        assert_eq!(
            err.to_string(),
            "invalid `key-metrics` payload: missing field `trend`"
        );

        let err = ReportError::generation("topics summary", "Ollama API error 500");
        assert!(err.to_string().contains("topics summary"));
    }
}
