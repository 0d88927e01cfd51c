//! # Error Classification Core
//!
//! The stateful heart of the triage pipeline:
//! - line cleaning and normalization of volatile substrings
//! - timestamp/message extraction from structured and plain log lines
//! - first-match-wins classification against ordered pattern dictionaries
//! - per-pod deduplicated error ledgers
//! - namespace-wide aggregation for pods with no status-level error

pub mod aggregator;
pub mod cleaner;
pub mod extractor;
pub mod ledger;
pub mod matcher;
pub mod restarts;
pub mod timefmt;

pub use aggregator::NamespaceAggregator;
pub use cleaner::{LineCleaner, normalize};
pub use extractor::{Extraction, extract};
pub use ledger::PodErrorLedger;
pub use matcher::{MatchMode, PatternSet, classify_line};
pub use restarts::RestartPolicy;

use serde::Serialize;

/// One retained error occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub line_number: usize,
    pub category: String,
    /// Display timestamp, `"unknown-time"` when the line carried none.
    pub timestamp: String,
    /// Cleaned message text.
    pub message: String,
    pub source_file: String,
    /// Container name derived from the log file name.
    pub container: String,
}
