//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sentilens.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".sentilens.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Sentiment data API settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "sentiment_report.md".to_string()
}

/// Sentiment data API settings.
///
/// Without a `base_url` the bundled datasets are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the sentiment data API.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Report subject used in every dataset path.
    #[serde(default = "default_tenant")]
    pub tenant: String,

    /// Request timeout in seconds.
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            tenant: default_tenant(),
            timeout_seconds: default_backend_timeout(),
        }
    }
}

fn default_tenant() -> String {
    "binance".to_string()
}

fn default_backend_timeout() -> u64 {
    30
}

/// LLM model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// Ollama API URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds, per generation call.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            ollama_url: default_ollama_url(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout() -> u64 {
    300
}

/// Report shaping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Topics kept, by mention volume.
    #[serde(default = "default_top_n")]
    pub top_topics: usize,

    /// Influencers kept, by influence.
    #[serde(default = "default_top_n")]
    pub top_influencers: usize,

    /// Keywords kept per polarity on each topic.
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_topics: default_top_n(),
            top_influencers: default_top_n(),
            max_keywords: default_max_keywords(),
        }
    }
}

fn default_top_n() -> usize {
    10
}

fn default_max_keywords() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load `.sentilens.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must load. Otherwise `.sentilens.toml` in `dir` is
    /// used when present, and defaults when not. A file that exists but
    /// does not parse is an error in both cases.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        Ok(Self::load_from_dir(dir)?.unwrap_or_default())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref tenant) = args.tenant {
            self.backend.tenant = tenant.clone();
        }
        if let Some(ref url) = args.backend_url {
            self.backend.base_url = Some(url.clone());
        }

        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref url) = args.ollama_url {
            self.model.ollama_url = url.clone();
        }
        if let Some(temperature) = args.temperature {
            self.model.temperature = temperature;
        }
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
            self.backend.timeout_seconds = timeout;
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check the merged settings that end up in request URLs.
    pub fn validate(&self) -> Result<()> {
        let tenant = self.backend.tenant.trim();
        if tenant.is_empty() {
            bail!("Tenant must not be empty");
        }
        if tenant.contains('/') {
            bail!("Tenant must not contain '/': {}", self.backend.tenant);
        }

        if let Some(url) = self.backend.base_url.as_deref() {
            let url = url.trim();
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("Backend URL must start with 'http://' or 'https://': {}", url);
            }
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
