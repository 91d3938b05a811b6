//! LLM-written narrative summaries.
//!
//! This module provides the text generation client and the two-tier
//! summary stage built on top of it.

pub mod client;
pub mod generator;
pub mod prompts;

pub use client::{OllamaClient, OllamaConfig, TextGenerator};
pub use generator::summarize;
