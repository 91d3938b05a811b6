//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Sentilens - sentiment analysis reports with AI-written summaries
///
/// Aggregates sentiment datasets for a tenant, reshapes them for
/// presentation and asks a local model to summarize every section.
/// Without a backend URL the bundled datasets are used.
///
/// Examples:
///   sentilens
///   sentilens --tenant binance --backend-url http://localhost:9950
///   sentilens --format json -o report.json
///   sentilens --dry-run
///   sentilens --classify "Withdrawals are frozen again"
///   sentilens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Tenant (report subject) to build the report for
    #[arg(short, long, value_name = "NAME")]
    pub tenant: Option<String>,

    /// Base URL of the sentiment data API
    ///
    /// When neither this nor `backend.base_url` is set, bundled datasets are used.
    #[arg(long, value_name = "URL", env = "SENTIMENT_API_URL")]
    pub backend_url: Option<String>,

    /// Ollama model used for summaries
    #[arg(short, long, env = "SENTILENS_MODEL")]
    pub model: Option<String>,

    /// Ollama API endpoint URL
    #[arg(long, value_name = "URL", env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Temperature for LLM responses (0.0 - 1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout in seconds for every external call
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sentilens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: fetch and reshape the datasets without calling the LLM
    ///
    /// Prints the post-processed data as JSON and exits.
    #[arg(long)]
    pub dry_run: bool,

    /// Classify the sentiment of a single text and exit
    ///
    /// Prints positive, negative or neutral.
    #[arg(long, value_name = "TEXT", conflicts_with_all = ["dry_run", "classify_cases"])]
    pub classify: Option<String>,

    /// Score the model on labelled cases from a TOML file and exit
    ///
    /// Accepts a `[[tests]]` array or one table per case, each with
    /// `input` and `expected`.
    #[arg(long, value_name = "FILE", conflicts_with = "dry_run")]
    pub classify_cases: Option<PathBuf>,

    /// Generate a default .sentilens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref tenant) = self.tenant {
            if tenant.trim().is_empty() {
                return Err("Tenant must not be empty".to_string());
            }
            if tenant.contains('/') {
                return Err("Tenant must not contain '/'".to_string());
            }
        }

        if let Some(ref url) = self.backend_url {
            if !url.is_empty() && !is_http_url(url) {
                return Err("Backend URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Ollama URL is not needed for dry-run
        if !self.dry_run {
            if let Some(ref url) = self.ollama_url {
                if !is_http_url(url) {
                    return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
                }
            }
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 1.0".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref text) = self.classify {
            if text.trim().is_empty() {
                return Err("Text to classify must not be empty".to_string());
            }
        }

        let modes = [self.dry_run, self.classify.is_some(), self.classify_cases.is_some()];
        if modes.iter().filter(|on| **on).count() > 1 {
            return Err("Use only one of --dry-run, --classify and --classify-cases".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `general.verbose` from the config file; `--quiet`
    /// overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
