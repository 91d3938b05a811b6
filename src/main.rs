//! Sentilens - sentiment analysis reports with AI-written summaries
//!
//! A CLI tool that aggregates sentiment datasets for a tenant, reshapes
//! them for presentation and uses Ollama to write a summary for every
//! section plus an overall synthesis.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments, configuration error or failed report build

mod analysis;
mod classify;
mod cli;
mod config;
mod error;
mod models;
mod pipeline;
mod report;
mod source;
mod summary;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use pipeline::ReportPipeline;
use std::path::Path;
use std::time::Duration;
use summary::{OllamaClient, OllamaConfig};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("Sentilens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Effective config: {:?}", config);

    if let Err(e) = run(args, config).await {
        match e.downcast_ref::<error::ReportError>() {
            Some(report_error) => error!("Run failed ({}): {}", report_error.kind(), e),
            None => error!("Run failed: {:#}", e),
        }
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .sentilens.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Set backend.base_url to use a live sentiment data API.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the selected mode: classification, dry run or a full report.
async fn run(args: Args, config: Config) -> Result<()> {
    let client = OllamaClient::new(OllamaConfig {
        ollama_url: config.model.ollama_url.clone(),
        model_name: config.model.name.clone(),
        temperature: config.model.temperature,
        timeout_seconds: config.model.timeout_seconds,
    })?;

    if let Some(ref text) = args.classify {
        let polarity = classify::classify_sentiment(&client, text).await?;
        println!("{}", polarity.to_string().to_lowercase());
        return Ok(());
    }

    if let Some(ref path) = args.classify_cases {
        return run_classify_cases(&client, path, args.quiet).await;
    }

    let source = source::from_config(&config.backend)?;
    let limits = analysis::Limits::from(&config.report);

    let pipeline = ReportPipeline::new(
        source.as_ref(),
        &client,
        config.backend.tenant.clone(),
        client.model_name(),
        limits,
    );

    // Handle --dry-run: fetch and reshape only. Stdout carries the JSON alone.
    if args.dry_run {
        if !args.quiet {
            eprintln!("🔍 Dry run: fetching datasets (no LLM call)...");
        }
        let data = pipeline.build_data().await?;
        println!("{}", report::generate_data_json(&data)?);
        if !args.quiet {
            eprintln!("✅ Dry run complete. No LLM calls were made.");
        }
        return Ok(());
    }

    if !args.quiet {
        println!("📊 Building sentiment report for {}", config.backend.tenant);
        println!("   Data: {}", source.origin());
        println!("   Model: {}", config.model.name);
        println!("   Ollama: {}", config.model.ollama_url);
        println!("   Timeout: {}s\n", config.model.timeout_seconds);
    }

    let spinner = if args.quiet {
        ProgressBar::hidden()
    } else {
        create_spinner()
    };
    spinner.set_message("Fetching datasets and writing summaries...");

    let result = pipeline.build_report().await;
    spinner.finish_and_clear();
    let report = result?;

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    let output_path = &config.general.output;
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path))?;

    if !args.quiet {
        println!("📝 Report Summary:");
        println!("   Sources: {}", report.data.sources.len());
        println!("   Trend days: {}", report.data.trends.len());
        println!("   Topics: {}", report.data.topics.len());
        println!("   Influencers: {}", report.data.influencers.len());
        println!("   Duration: {:.1}s", report.metadata.duration_seconds);
        println!("\n✅ Report saved to: {}", output_path);
    }

    Ok(())
}

/// Score the model on labelled cases and print one line per case.
async fn run_classify_cases(client: &OllamaClient, path: &Path, quiet: bool) -> Result<()> {
    let cases = classify::load_cases(path)?;
    let summary = classify::run_cases(client, &cases).await?;

    if !quiet {
        for outcome in &summary.outcomes {
            let mark = if outcome.is_match() { "✅" } else { "❌" };
            println!(
                "{} expected={} actual={} | {}",
                mark, outcome.expected, outcome.actual, outcome.input
            );
        }
        println!();
    }
    println!(
        "Exact match: {}/{} ({})",
        summary.matched(),
        summary.outcomes.len(),
        report::format::percent(summary.score())
    );
    Ok(())
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        Ok(style) => spinner.set_style(style),
        Err(e) => debug!("Falling back to default spinner style: {}", e),
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Load configuration, merge CLI overrides and check the result.
///
/// A config file that exists but cannot be parsed is an error, whether it
/// was passed with `--config` or found in the current directory.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref(), Path::new("."))?;
    config.merge_with_args(args);
    config.validate()?;
    Ok(config)
}
