//! Warning extraction from the `kubectl describe pods` snapshot.

use std::path::Path;

use log::warn;

use crate::classifier::{LineCleaner, MatchMode, PatternSet, classify_line};
use crate::bundle::pods::PodRecord;

/// Scan `describe/pods.txt` for lines matching the describe dictionary and
/// append them (non-dedup) to the owning errored pod's ledger. The current
/// pod is tracked through the `Name:` section headers.
pub fn scan_describe(
    namespace_path: &Path,
    pods: &mut [PodRecord],
    patterns: &PatternSet,
    cleaner: &LineCleaner,
) {
    let path = namespace_path.join("describe").join("pods.txt");
    if !path.is_file() {
        warn!(
            "the file {} does not exist, skipping describe pod checks",
            path.display()
        );
        return;
    }
    let content = match super::read_lossy(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return;
        }
    };

    let source = path.to_string_lossy().into_owned();
    let mut current: Option<usize> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        if let Some(rest) = line.strip_prefix("Name:") {
            let name = rest.trim();
            current = pods.iter().position(|pod| pod.name == name);
        }
        let Some(pod_idx) = current else {
            continue;
        };
        if classify_line(line, patterns, MatchMode::Any).is_some() {
            let text = format!("{line_number}: {}", cleaner.clean(line.trim()));
            pods[pod_idx].ledger.add_line(&source, text);
        }
    }
}
