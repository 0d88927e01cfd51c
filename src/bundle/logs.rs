//! Per-pod log-file scans: the dedup ledger path for errored pods and the
//! namespace-wide aggregation path for healthy pods.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use crate::bundle::pods::PodRecord;
use crate::classifier::{
    LineCleaner, MatchMode, NamespaceAggregator, PatternSet, classify_line,
};

/// ANY-mode scan of every log file of every errored pod. Hits go through the
/// deduplicating ledger; an unreadable file is reported once and skipped.
pub fn scan_errored_pods(
    pods: &mut [PodRecord],
    patterns: &PatternSet,
    cleaner: &LineCleaner,
    time_format: &str,
) {
    for pod in pods.iter_mut() {
        debug!("checking logs for pod {}", pod.name);
        if pod.log_files.is_empty() {
            warn!("no log files found for pod {}", pod.name);
            continue;
        }
        for file in pod.log_files.clone() {
            let source = file.to_string_lossy().into_owned();
            let content = match crate::bundle::read_lossy(&file) {
                Ok(content) => content,
                Err(e) => {
                    warn!("could not read {}: {e}", file.display());
                    continue;
                }
            };
            for (idx, line) in content.lines().enumerate() {
                if let Some(category) = classify_line(line, patterns, MatchMode::Any) {
                    pod.ledger
                        .record(cleaner, time_format, &source, category, line, idx + 1);
                }
            }
        }
    }
}

/// Same matching for pods with no status-level error; hits are collected
/// into the namespace aggregator (first occurrence per file and category).
pub fn scan_healthy_pods(
    pods: &[PodRecord],
    patterns: &PatternSet,
    cleaner: &LineCleaner,
    time_format: &str,
) -> NamespaceAggregator {
    let mut aggregator = NamespaceAggregator::new();

    let total: u64 = pods.iter().map(|pod| pod.log_files.len() as u64).sum();
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("  {msg:<40} {bar:40.cyan/blue} {pos}/{len} files ({percent}%)")
            .unwrap()
            .progress_chars("=> "),
    );

    for pod in pods {
        debug!("analyzing pod without errors: {}", pod.name);
        for file in &pod.log_files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            progress.set_message(file_name);
            progress.inc(1);

            let source = file.to_string_lossy().into_owned();
            let content = match crate::bundle::read_lossy(file) {
                Ok(content) => content,
                Err(e) => {
                    warn!("could not read {}: {e}", file.display());
                    continue;
                }
            };
            for (idx, line) in content.lines().enumerate() {
                if let Some(category) = classify_line(line, patterns, MatchMode::Any) {
                    aggregator.collect(cleaner, time_format, line, &source, category, idx + 1);
                }
            }
        }
    }
    progress.finish_and_clear();

    aggregator
}
