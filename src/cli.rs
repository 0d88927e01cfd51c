use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pod-triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Triage Kubernetes diagnostic bundles with error-pattern classification")]
#[command(
    long_about = "A CLI tool that walks an unpacked Kubernetes diagnostic bundle, classifies pods from their status lines, scans per-pod log files against named error-pattern dictionaries, deduplicates repeated events, and reports per-pod and namespace-wide error summaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Triage one namespace snapshot of a diagnostic bundle
    Triage {
        /// Path to the unpacked bundle (the folder containing `kubernetes/`)
        #[arg(value_name = "BUNDLE_PATH")]
        bundle: PathBuf,

        /// Namespace snapshot to analyze (prompted interactively when omitted)
        #[arg(short, long)]
        namespace: Option<String>,

        /// JSON pattern file replacing the built-in log error dictionary
        #[arg(short, long, value_name = "FILE")]
        patterns: Option<PathBuf>,

        /// Emit one JSON document instead of human-readable reports
        #[arg(long)]
        json: bool,

        /// Do not write the timestamped report file
        #[arg(long)]
        no_report_file: bool,
    },

    /// List namespace snapshots available in a bundle
    Namespaces {
        /// Path to the unpacked bundle
        #[arg(value_name = "BUNDLE_PATH")]
        bundle: PathBuf,
    },

    /// Inspect, validate, or export error-pattern dictionaries
    Patterns {
        #[command(subcommand)]
        command: PatternsCommand,
    },
}

#[derive(Subcommand)]
pub enum PatternsCommand {
    /// Print the effective pattern library
    Show {
        /// Log pattern file overriding the built-in dictionary
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Validate a pattern file without running a triage
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the built-in log patterns to a JSON file
    Export {
        #[arg(value_name = "FILE", default_value = "error_patterns.json")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
