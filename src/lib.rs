//! # pod-triage
//!
//! A Rust-based command-line application that triages Kubernetes
//! diagnostic-bundle dumps: it classifies pods from `kubectl get pods`
//! output, scans `kubectl describe pods` text and per-pod log files against
//! named error-pattern dictionaries, deduplicates repeated events, and
//! aggregates per-pod and namespace-wide error statistics for reporting.
//!
//! ## Features
//!
//! - **Pattern Classification**: first-match-wins matching of lines against
//!   ordered category dictionaries, in any-of or all-of mode
//! - **Message Normalization**: volatile substrings (IPs, ports, job and pod
//!   identifiers, timestamps) are folded away so identical events compare equal
//! - **Deduplication**: per-pod ledgers retain one entry per logical event,
//!   keeping the most recent occurrence
//! - **Namespace Summaries**: latent errors in healthy pods are aggregated
//!   per category, file, and container
//!
//! ## Example
//!
//! ```rust,no_run
//! use pod_triage::classifier::{MatchMode, PatternSet, classify_line};
//!
//! let mut patterns = PatternSet::new();
//! patterns.insert("Crashed", vec!["CrashLoopBackOff".to_string()]);
//! let category = classify_line("pod-x 0/1 CrashLoopBackOff 3 2d", &patterns, MatchMode::Any);
//! assert_eq!(category, Some("Crashed"));
//! ```

pub mod bundle;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod patterns;
pub mod report;

// Re-export commonly used types and functions
pub use classifier::{ErrorEntry, MatchMode, PatternSet, classify_line};
pub use error::{Result, TriageError};
pub use patterns::PatternLibrary;

use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Triage {
            bundle,
            namespace,
            patterns,
            json,
            no_report_file,
        } => handlers::handle_triage(bundle, namespace, patterns, json, no_report_file, config),
        Commands::Namespaces { bundle } => handlers::handle_namespaces(&bundle),
        Commands::Patterns { command } => handlers::handle_patterns(command),
    }
}
