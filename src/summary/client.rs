//! Text generation over the Ollama chat API.

use crate::error::{ReportError, ReportResult};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A single request/response text generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` under the given system instructions.
    ///
    /// `stage` names the caller in error messages and logs.
    async fn generate(&self, stage: &str, system: &str, prompt: &str) -> ReportResult<String>;
}

/// Configuration for the Ollama client.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model_name: "llama3.2:latest".to_string(),
            temperature: 0.3,
            timeout_seconds: 300,
        }
    }
}

/// Message in the chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Ollama chat API request.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Ollama chat API response.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

/// Client for a local or remote Ollama server.
pub struct OllamaClient {
    config: OllamaConfig,
    http_client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, stage: &str, system: &str, prompt: &str) -> ReportResult<String> {
        let url = format!("{}/api/chat", self.config.ollama_url.trim_end_matches('/'));

        let request = OllamaChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        debug!("Sending {} request ({} prompt bytes)", stage, prompt.len());

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReportError::transport(
                        &url,
                        format!("request timed out after {}s", self.config.timeout_seconds),
                    )
                } else if e.is_connect() {
                    ReportError::transport(
                        &url,
                        format!(
                            "cannot connect to Ollama at {}. Is Ollama running?",
                            self.config.ollama_url
                        ),
                    )
                } else {
                    ReportError::transport(&url, e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::generation(
                stage,
                format!("Ollama API error {}: {}", status, body),
            ));
        }

        let chat_response: OllamaChatResponse = response.json().await.map_err(|e| {
            ReportError::generation(stage, format!("failed to parse Ollama response: {}", e))
        })?;

        let content = chat_response.message.content.trim();
        if content.is_empty() {
            return Err(ReportError::generation(stage, "model returned an empty answer"));
        }

        Ok(content.to_string())
    }
}
