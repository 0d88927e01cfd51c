//! Restart-count thresholds that can mark a pod as errored regardless of
//! what its status line matches.

use std::collections::BTreeMap;

pub const DEFAULT_RESTART_THRESHOLD: u32 = 10;

const DEFAULT_KEY: &str = "default";

/// Per-pod-name-prefix restart thresholds; the most specific (longest)
/// matching prefix wins, then the `default` entry, then the built-in 10.
#[derive(Debug, Clone, Default)]
pub struct RestartPolicy {
    thresholds: BTreeMap<String, u32>,
}

impl RestartPolicy {
    pub fn new(thresholds: BTreeMap<String, u32>) -> Self {
        Self { thresholds }
    }

    pub fn threshold_for(&self, pod_name: &str) -> u32 {
        self.thresholds
            .iter()
            .filter(|(prefix, _)| *prefix != DEFAULT_KEY && pod_name.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, threshold)| *threshold)
            .unwrap_or_else(|| {
                self.thresholds
                    .get(DEFAULT_KEY)
                    .copied()
                    .unwrap_or(DEFAULT_RESTART_THRESHOLD)
            })
    }

    /// Synthesized category when the restart count exceeds the applicable
    /// threshold; overrides the status-line pattern match.
    pub fn classify(&self, pod_name: &str, restart_count: u32) -> Option<String> {
        let threshold = self.threshold_for(pod_name);
        (restart_count > threshold).then(|| format!("Restart threshold({threshold}) exceeded"))
    }
}
