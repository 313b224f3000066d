//! Synthetic Fraud Transaction Generator
//!
//! Synthesizes payment transactions with plausible merchant, amount and
//! network structure, scores them with a heuristic fraud model, and streams
//! them to CSV in bounded batches. Output is reproducible for a fixed seed
//! and anchor time.

pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod risk;
pub mod synthesizer;
pub mod types;
pub mod writer;

pub use config::{AppConfig, StreamPlan};
pub use error::GeneratorError;
pub use metrics::DatasetMetrics;
pub use synthesizer::{synthesize, RecordSynthesizer};
pub use types::transaction::Transaction;
pub use writer::{stream, write_batch, ChunkedWriter, StreamSummary};
