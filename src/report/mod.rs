//! Rendering of pod reports and namespace summaries to the console, the
//! report file, and JSON artifacts.

use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use log::info;
use serde_json::{Map, Value, json};

use crate::bundle::pods::{NO_ISSUES, PodClassification, PodRecord};
use crate::classifier::NamespaceAggregator;
use crate::error::Result;

const REPORT_DATETIME_FORMAT: &str = "%Y%m%d_%H%M%S";

fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Sink for rendered output: always the console, optionally mirrored into a
/// plain-text report file (without color codes).
pub struct Reporter {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl Reporter {
    pub fn console_only() -> Self {
        Self {
            file: None,
            path: None,
        }
    }

    /// Also mirror into `<folder>/pod_triage_<namespace>_<timestamp>.txt`.
    pub fn with_file(folder: &Path, namespace: &str) -> Result<Self> {
        fs::create_dir_all(folder)?;
        let path = folder.join(format!(
            "pod_triage_{namespace}_{}.txt",
            Local::now().format(REPORT_DATETIME_FORMAT)
        ));
        let file = File::create(&path)?;
        info!("report file: {}", path.display());
        Ok(Self {
            file: Some(file),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn emit(&mut self, text: &str) {
        println!("{text}");
        self.mirror(text);
    }

    /// Styled console output with a plain twin for the report file.
    pub fn emit_styled(&mut self, console: &str, plain: &str) {
        println!("{console}");
        self.mirror(plain);
    }

    fn mirror(&mut self, text: &str) {
        if let Some(file) = self.file.as_mut() {
            // A failed mirror write should not kill the scan output.
            let _ = writeln!(file, "{text}");
        }
    }
}

/// Per-pod detail block: identity, log files, then the ledger's per-file
/// issue lists.
pub fn render_pod_report(reporter: &mut Reporter, pod: &PodRecord) {
    let separator = "-".repeat(20);
    reporter.emit(&separator);
    reporter.emit_styled(
        &format!("Pod Name: {}", pod.name.bold()),
        &format!("Pod Name: {}", pod.name),
    );
    let status_plain = format!("Status: {}", pod.status_category);
    if pod.status_category == NO_ISSUES {
        reporter.emit_styled(
            &format!("Status: {}", pod.status_category.green()),
            &status_plain,
        );
    } else {
        reporter.emit_styled(
            &format!("Status: {}", pod.status_category.red()),
            &status_plain,
        );
    }
    reporter.emit(&format!("Node: {}", pod.node));
    reporter.emit("Log Files:");
    for file in &pod.log_files {
        reporter.emit(&format!("- {}", file.display()));
    }

    reporter.emit("\nDetails:");
    let report = pod.ledger.report();
    if report.is_empty() {
        reporter.emit("No additional details available.");
    } else {
        for (source_file, entries) in &report {
            reporter.emit(&format!(
                "\n{} in {source_file}:",
                pluralize(entries.len(), "Issue")
            ));
            for entry in entries {
                reporter.emit(&format!("  - {entry}"));
            }
        }
    }
    reporter.emit(&separator);
}

/// Cross-pod summaries for the healthy-pod scan: category -> files (capped)
/// and category -> containers.
pub fn render_namespace_summary(
    reporter: &mut Reporter,
    aggregator: &NamespaceAggregator,
    max_files_to_show: usize,
) {
    if aggregator.is_empty() {
        reporter.emit("\nNo latent errors found in pods without status-level issues.");
        return;
    }

    for summary in aggregator.by_category_summary(max_files_to_show) {
        reporter.emit_styled(
            &format!(
                "\nError: [{}] found in {}",
                summary.category.yellow(),
                pluralize(summary.total, "file")
            ),
            &format!(
                "\nError: [{}] found in {}",
                summary.category,
                pluralize(summary.total, "file")
            ),
        );
        reporter.emit("List of files:");
        for entry in summary.preview {
            if !entry.message.is_empty() {
                reporter.emit(&format!(
                    " - {} [{}]: {}",
                    entry.source_file, entry.line_number, entry.message
                ));
            }
        }
        if summary.total > max_files_to_show {
            reporter.emit(&format!(
                " - ... and {}",
                pluralize(summary.total - max_files_to_show, "more file")
            ));
        }
    }

    for (category, containers) in aggregator.by_container_summary() {
        reporter.emit_styled(
            &format!(
                "\nError [{}] found in {}",
                category.yellow(),
                pluralize(containers.len(), "container")
            ),
            &format!(
                "\nError [{category}] found in {}",
                pluralize(containers.len(), "container")
            ),
        );
        for container in containers {
            if !container.is_empty() {
                reporter.emit(&format!(" - {container}"));
            }
        }
    }
}

/// Write `all_errors.json`: pod name -> flat array of formatted error
/// strings, UTF-8, 2-space indent.
pub fn write_all_errors(folder: &Path, pods: &[PodRecord]) -> Result<PathBuf> {
    fs::create_dir_all(folder)?;
    let mut map = Map::new();
    for pod in pods {
        let entries: Vec<Value> = pod
            .ledger
            .formatted_entries()
            .into_iter()
            .map(Value::String)
            .collect();
        map.insert(pod.name.clone(), Value::Array(entries));
    }
    let path = folder.join("all_errors.json");
    fs::write(&path, serde_json::to_string_pretty(&Value::Object(map))?)?;
    info!("error artifact: {}", path.display());
    Ok(path)
}

/// One JSON document with the whole triage result, for `--json` runs.
pub fn render_json(
    namespace: &str,
    classification: &PodClassification,
    aggregator: &NamespaceAggregator,
    max_files_to_show: usize,
) -> Result<String> {
    let errored: Vec<Value> = classification
        .errored
        .iter()
        .map(|pod| {
            let files: Map<String, Value> = pod
                .ledger
                .report()
                .into_iter()
                .map(|(file, entries)| {
                    (
                        file,
                        Value::Array(entries.into_iter().map(Value::String).collect()),
                    )
                })
                .collect();
            json!({
                "name": pod.name,
                "status": pod.status_category,
                "node": pod.node,
                "errors": files,
            })
        })
        .collect();

    let healthy: Vec<Value> = classification
        .healthy
        .iter()
        .map(|pod| json!({ "name": pod.name, "node": pod.node }))
        .collect();

    let mut categories = Map::new();
    for summary in aggregator.by_category_summary(max_files_to_show) {
        categories.insert(
            summary.category.to_string(),
            json!({
                "total": summary.total,
                "entries": summary.preview,
            }),
        );
    }

    let mut containers = Map::new();
    for (category, names) in aggregator.by_container_summary() {
        containers.insert(
            category.to_string(),
            Value::Array(
                names
                    .into_iter()
                    .map(|n| Value::String(n.to_string()))
                    .collect(),
            ),
        );
    }

    let doc = json!({
        "namespace": namespace,
        "pods_with_errors": errored,
        "pods_without_errors": healthy,
        "categories": categories,
        "containers": containers,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
