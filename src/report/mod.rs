//! Report assembly and rendering.

pub mod assembler;
pub mod format;
pub mod generator;

pub use assembler::assemble;
pub use generator::{generate_data_json, generate_json_report, generate_markdown_report};
