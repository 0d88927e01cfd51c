//! Diagnostic-bundle filesystem layout and scanning.
//!
//! A bundle root contains `kubernetes/<namespace>/` snapshot directories;
//! each snapshot has `get/pods.txt`, `describe/pods.txt` and per-pod log
//! files under `logs/`.

pub mod describe;
pub mod logs;
pub mod pods;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TriageError};

pub const KUBERNETES_DIR: &str = "kubernetes";
pub const LOGS_DIR: &str = "logs";

/// List namespace snapshot directories under `<bundle>/kubernetes/`.
pub fn namespaces(bundle: &Path) -> Result<Vec<String>> {
    let root = bundle.join(KUBERNETES_DIR);
    if !root.is_dir() {
        return Err(TriageError::BundleLayout(format!(
            "the '{KUBERNETES_DIR}' folder does not exist under {}",
            bundle.display()
        )));
    }

    let mut names: Vec<String> = fs::read_dir(&root)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    if names.is_empty() {
        return Err(TriageError::BundleLayout(format!(
            "no namespace folders under {}",
            root.display()
        )));
    }
    Ok(names)
}

pub fn namespace_path(bundle: &Path, namespace: &str) -> PathBuf {
    bundle.join(KUBERNETES_DIR).join(namespace)
}

/// Read a whole file, replacing invalid UTF-8 rather than failing the scan.
pub(crate) fn read_lossy(path: &Path) -> std::io::Result<String> {
    Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_kubernetes_folder_is_a_layout_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = namespaces(dir.path()).unwrap_err();
        assert!(matches!(err, TriageError::BundleLayout(_)));
    }

    #[test]
    fn namespaces_are_listed_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("kubernetes/zulu")).unwrap();
        fs::create_dir_all(dir.path().join("kubernetes/alpha")).unwrap();
        fs::write(dir.path().join("kubernetes/stray.txt"), "not a namespace").unwrap();
        assert_eq!(namespaces(dir.path()).unwrap(), ["alpha", "zulu"]);
    }

    #[test]
    fn read_lossy_replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.log");
        fs::write(&path, b"ok line\xff\xfe still ok").unwrap();
        let content = read_lossy(&path).unwrap();
        assert!(content.starts_with("ok line"));
        assert!(content.ends_with("still ok"));
    }
}
