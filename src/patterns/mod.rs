//! Error-pattern dictionaries: the built-in defaults and the user
//! pattern-file loader.

mod builtin;
mod repair;

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::classifier::matcher::PatternSet;
use crate::error::{Result, TriageError};

/// The three dictionaries a triage run consults, one per input kind.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    /// ALL-mode matching against `kubectl get pods` status lines.
    pub pod_status: PatternSet,
    /// ANY-mode matching against `kubectl describe pods` lines.
    pub describe: PatternSet,
    /// ANY-mode matching against per-pod log files.
    pub logs: PatternSet,
}

impl PatternLibrary {
    pub fn builtin() -> Self {
        builtin::library()
    }

    /// Replace the log-file dictionary with one loaded from a JSON file.
    pub fn with_log_patterns_from(mut self, path: &Path) -> Result<Self> {
        self.logs = load_pattern_file(path)?;
        Ok(self)
    }
}

/// Load a `{category: [patterns...]}` JSON file. A parse failure gets one
/// repair attempt (unescaped inner quotes, trailing commas) before the file
/// is rejected. Non-string categories or pattern elements are rejected.
pub fn load_pattern_file(path: &Path) -> Result<PatternSet> {
    let content = fs::read_to_string(path)?;
    let set = match serde_json::from_str::<PatternSet>(&content) {
        Ok(set) => set,
        Err(first_err) => {
            info!(
                "pattern file {} failed to parse ({first_err}), attempting auto-fix",
                path.display()
            );
            let repaired = repair::repair_json(&content);
            serde_json::from_str::<PatternSet>(&repaired).map_err(|e| {
                TriageError::InvalidPatternFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?
        }
    };
    if set.is_empty() {
        warn!("pattern file {} defines no categories", path.display());
    }
    Ok(set)
}
