//! Namespace-wide aggregation of errors found in pods with no status-level
//! issue, used to surface latent problems across the whole snapshot.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use crate::classifier::ErrorEntry;
use crate::classifier::cleaner::LineCleaner;
use crate::classifier::extractor::extract;
use crate::classifier::timefmt::format_timestamp;

/// Container name from a pod log file name: the segment after the last `_`,
/// minus the `.log` suffix.
pub fn parse_container_name(source_file: &str) -> String {
    let file_name = Path::new(source_file)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name
        .rsplit('_')
        .next()
        .unwrap_or(file_name.as_str())
        .trim_end_matches(".log")
        .to_string()
}

/// Per-category preview produced for the presentation layer.
#[derive(Debug)]
pub struct CategorySummary<'a> {
    pub category: &'a str,
    pub total: usize,
    /// First entries up to the configured cap.
    pub preview: &'a [ErrorEntry],
}

/// Cross-pod error collection keyed by `(source_file, category)`; the first
/// occurrence per key wins, deliberately coarser than the per-pod ledger.
#[derive(Debug, Default)]
pub struct NamespaceAggregator {
    seen: HashSet<(String, String)>,
    categories: Vec<String>,
    entries: HashMap<String, Vec<ErrorEntry>>,
}

impl NamespaceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entry from a matched log line and collect it.
    pub fn collect(
        &mut self,
        cleaner: &LineCleaner,
        time_format: &str,
        line: &str,
        source_file: &str,
        category: &str,
        line_number: usize,
    ) {
        let extraction = extract(line);
        self.add(ErrorEntry {
            line_number,
            category: category.to_string(),
            timestamp: format_timestamp(extraction.timestamp(), time_format),
            message: cleaner.clean(extraction.message()),
            source_file: source_file.to_string(),
            container: parse_container_name(source_file),
        });
    }

    /// Retain the entry unless its `(source_file, category)` pair was
    /// already seen.
    pub fn add(&mut self, entry: ErrorEntry) {
        let key = (entry.source_file.clone(), entry.category.clone());
        if !self.seen.insert(key) {
            return;
        }
        if !self.entries.contains_key(&entry.category) {
            self.categories.push(entry.category.clone());
        }
        self.entries
            .entry(entry.category.clone())
            .or_default()
            .push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories in first-seen order with total counts and a capped preview.
    pub fn by_category_summary(&self, cap: usize) -> Vec<CategorySummary<'_>> {
        self.categories
            .iter()
            .filter_map(|category| {
                let entries = self.entries.get(category)?;
                Some(CategorySummary {
                    category,
                    total: entries.len(),
                    preview: &entries[..entries.len().min(cap)],
                })
            })
            .collect()
    }

    /// Distinct container names per category, sorted for stable output.
    pub fn by_container_summary(&self) -> Vec<(&str, BTreeSet<&str>)> {
        self.categories
            .iter()
            .filter_map(|category| {
                let entries = self.entries.get(category)?;
                let containers = entries
                    .iter()
                    .map(|e| e.container.as_str())
                    .collect::<BTreeSet<_>>();
                Some((category.as_str(), containers))
            })
            .collect()
    }
}
