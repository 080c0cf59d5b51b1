//! Evaluation module - assembly quality metrics

pub mod metrics;

pub use metrics::{evaluate_lengths, n50, LengthStats};
