//! Pod classification from the `kubectl get pods` snapshot.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::classifier::{MatchMode, PatternSet, PodErrorLedger, RestartPolicy, classify_line};
use crate::error::{Result, TriageError};

/// Status assigned to pods whose status line matched nothing.
pub const NO_ISSUES: &str = "No Issues";

/// One pod from the snapshot, owning its error ledger and resolved log files.
#[derive(Debug)]
pub struct PodRecord {
    pub name: String,
    pub status_category: String,
    pub node: String,
    pub ledger: PodErrorLedger,
    pub log_files: Vec<PathBuf>,
}

impl PodRecord {
    fn new(name: &str, status_category: String, node: String, namespace_path: &Path) -> Self {
        Self {
            name: name.to_string(),
            status_category,
            node,
            ledger: PodErrorLedger::new(),
            log_files: log_files_for(namespace_path, name),
        }
    }
}

/// Log files belonging to a pod: files under `logs/` whose name starts with
/// the pod name, sorted for a reproducible scan order.
fn log_files_for(namespace_path: &Path, pod_name: &str) -> Vec<PathBuf> {
    let logs_dir = namespace_path.join(super::LOGS_DIR);
    if !logs_dir.is_dir() {
        debug!(
            "no logs directory for pod {pod_name} at {}",
            logs_dir.display()
        );
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(&logs_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(pod_name))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

#[derive(Debug)]
pub struct PodClassification {
    pub errored: Vec<PodRecord>,
    pub healthy: Vec<PodRecord>,
}

/// Parse `get/pods.txt` and split pods into errored and healthy.
///
/// The status line is matched in ALL mode; the restart-threshold policy can
/// override the result. Matched pods get their status line appended to their
/// ledger through the non-dedup path.
pub fn classify_pods(
    namespace_path: &Path,
    patterns: &PatternSet,
    restarts: &RestartPolicy,
) -> Result<PodClassification> {
    let path = namespace_path.join("get").join("pods.txt");
    if !path.is_file() {
        return Err(TriageError::BundleLayout(format!(
            "the file {} does not exist",
            path.display()
        )));
    }
    let content = super::read_lossy(&path)?;
    let lines: Vec<&str> = content.lines().collect();

    let header_idx = lines
        .iter()
        .position(|line| line.starts_with("NAME"))
        .unwrap_or(0);
    let node_idx = lines.get(header_idx).and_then(|header| {
        header.split_whitespace().position(|field| field == "NODE")
    });
    if node_idx.is_none() {
        warn!(
            "the 'NODE' column is not present in {}; defaulting to \"unknown\"",
            path.display()
        );
    }

    let source = path.to_string_lossy().into_owned();
    let mut errored = Vec::new();
    let mut healthy = Vec::new();

    for (offset, line) in lines.iter().enumerate().skip(header_idx + 1) {
        let line_number = offset + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(&name) = fields.first() else {
            continue;
        };
        if name == "NAME" {
            continue;
        }

        let node = node_idx
            .and_then(|idx| fields.get(idx))
            .map_or_else(|| "unknown".to_string(), |f| f.to_string());
        let restart_count = fields
            .get(3)
            .and_then(|f| f.parse::<u32>().ok())
            .unwrap_or(0);

        let mut category = classify_line(line, patterns, MatchMode::All).map(str::to_string);
        if let Some(exceeded) = restarts.classify(name, restart_count) {
            category = Some(exceeded);
        }

        match category {
            Some(category) => {
                debug!("pod {name} classified as {category}");
                let mut pod = PodRecord::new(name, category, node, namespace_path);
                pod.ledger
                    .add_line(&source, format!("{line_number}: {}", line.trim()));
                errored.push(pod);
            }
            None => healthy.push(PodRecord::new(
                name,
                NO_ISSUES.to_string(),
                node,
                namespace_path,
            )),
        }
    }

    Ok(PodClassification { errored, healthy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternLibrary;
    use std::fs;

    const PODS_TXT: &str = "\
NAME       READY  STATUS            RESTARTS  AGE  IP         NODE
worker-1   0/1    CrashLoopBackOff  5         10m  10.0.0.5   node-a
web-1      1/1    Running           2         5m   10.0.0.6   node-b
flaky-1    1/1    Running           42        5m   10.0.0.7   node-c
";

    fn snapshot(pods_txt: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("get")).unwrap();
        fs::write(dir.path().join("get/pods.txt"), pods_txt).unwrap();
        dir
    }

    #[test]
    fn splits_pods_by_status_match() {
        let dir = snapshot(PODS_TXT);
        let library = PatternLibrary::builtin();
        let classification =
            classify_pods(dir.path(), &library.pod_status, &RestartPolicy::default()).unwrap();

        assert_eq!(classification.errored.len(), 2);
        assert_eq!(classification.errored[0].name, "worker-1");
        assert_eq!(classification.errored[0].status_category, "Crashed");
        assert_eq!(classification.errored[0].node, "node-a");
        assert_eq!(classification.healthy.len(), 1);
        assert_eq!(classification.healthy[0].name, "web-1");
        assert_eq!(classification.healthy[0].status_category, NO_ISSUES);
    }

    #[test]
    fn restart_threshold_overrides_the_pattern_result() {
        let dir = snapshot(PODS_TXT);
        let library = PatternLibrary::builtin();
        let policy = RestartPolicy::new(
            [("default".to_string(), 10), ("flaky-".to_string(), 1)]
                .into_iter()
                .collect(),
        );
        let classification = classify_pods(dir.path(), &library.pod_status, &policy).unwrap();

        let flaky = classification
            .errored
            .iter()
            .find(|p| p.name == "flaky-1")
            .unwrap();
        assert_eq!(flaky.status_category, "Restart threshold(1) exceeded");
    }

    #[test]
    fn status_line_lands_in_the_ledger() {
        let dir = snapshot(PODS_TXT);
        let library = PatternLibrary::builtin();
        let classification =
            classify_pods(dir.path(), &library.pod_status, &RestartPolicy::default()).unwrap();
        let report = classification.errored[0].ledger.report();
        assert_eq!(report.len(), 1);
        assert!(report[0].1[0].starts_with("2:"));
        assert!(report[0].1[0].contains("CrashLoopBackOff"));
    }

    #[test]
    fn missing_node_column_defaults_to_unknown() {
        let dir = snapshot(
            "NAME       READY  STATUS            RESTARTS  AGE\n\
             worker-1   0/1    CrashLoopBackOff  5         10m\n",
        );
        let library = PatternLibrary::builtin();
        let classification =
            classify_pods(dir.path(), &library.pod_status, &RestartPolicy::default()).unwrap();
        assert_eq!(classification.errored[0].node, "unknown");
    }

    #[test]
    fn missing_pods_file_is_a_layout_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = PatternLibrary::builtin();
        let err = classify_pods(dir.path(), &library.pod_status, &RestartPolicy::default())
            .unwrap_err();
        assert!(matches!(err, TriageError::BundleLayout(_)));
    }

    #[test]
    fn pod_log_files_are_matched_by_name_prefix() {
        let dir = snapshot(PODS_TXT);
        fs::create_dir_all(dir.path().join("logs")).unwrap();
        fs::write(dir.path().join("logs/worker-1_cas.log"), "").unwrap();
        fs::write(dir.path().join("logs/worker-1_init.log"), "").unwrap();
        fs::write(dir.path().join("logs/web-1_web.log"), "").unwrap();

        let library = PatternLibrary::builtin();
        let classification =
            classify_pods(dir.path(), &library.pod_status, &RestartPolicy::default()).unwrap();
        let worker = &classification.errored[0];
        assert_eq!(worker.log_files.len(), 2);
        assert!(worker.log_files.iter().all(|f| {
            f.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("worker-1")
        }));
    }
}
