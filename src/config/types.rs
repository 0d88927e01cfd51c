use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Tool configuration, loaded from `.pod-triage.toml` or defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaner: CleanerConfig,
    pub report: ReportConfig,
    /// Pod-name-prefix -> restart-count threshold. The `default` entry
    /// applies to pods no other prefix matches.
    pub restart_thresholds: BTreeMap<String, u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleaner: CleanerConfig::default(),
            report: ReportConfig::default(),
            restart_thresholds: BTreeMap::new(),
        }
    }
}

/// Per-rule toggles for the line cleaner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub ip_address: bool,
    pub port: bool,
    pub job_number: bool,
    pub job_id: bool,
    pub pod_id: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            ip_address: true,
            port: true,
            job_number: true,
            job_id: true,
            pod_id: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Cap on the per-category file list in the namespace summary.
    pub max_files_to_show: usize,
    /// strftime format applied to parseable timestamps in reports.
    pub output_timestamp_format: String,
    /// Folder receiving the report file and `all_errors.json`.
    pub output_folder: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_files_to_show: 10,
            output_timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            output_folder: PathBuf::from("output"),
        }
    }
}
