#![forbid(unsafe_code)]

pub mod config;
pub mod gates;
pub mod pipeline;
pub mod types;

pub use pipeline::{PipelineMetrics, decide};
