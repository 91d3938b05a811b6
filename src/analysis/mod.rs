//! Dataset aggregation and reshaping.

pub mod aggregator;
pub mod postprocess;

pub use aggregator::aggregate;
pub use postprocess::{postprocess, Limits};
