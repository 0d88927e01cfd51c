//! Per-pod store of retained error entries.
//!
//! The dedup map is the source of truth; the per-file report is a projection
//! computed on read, so the two can never drift.

use std::collections::HashMap;

use crate::classifier::cleaner::{LineCleaner, normalize};
use crate::classifier::extractor::extract;
use crate::classifier::timefmt::format_timestamp;

/// `(source_file, normalized message)`: the identity of a logical event.
type DedupKey = (String, String);

#[derive(Debug)]
struct Slot {
    source_file: String,
    /// Raw extracted timestamp for deduplicated entries; `None` for entries
    /// appended through the non-dedup path.
    ts: Option<String>,
    text: String,
}

/// Deduplicated per-pod error ledger with a last-write-wins-by-timestamp
/// policy, plus an order-preserving append path for low-volume ingestion
/// (pod-status and describe lines).
#[derive(Debug, Default)]
pub struct PodErrorLedger {
    slots: Vec<Slot>,
    dedup: HashMap<DedupKey, usize>,
}

impl PodErrorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional append, no deduplication.
    pub fn add_line(&mut self, source_file: &str, text: impl Into<String>) {
        self.slots.push(Slot {
            source_file: source_file.to_string(),
            ts: None,
            text: text.into(),
        });
    }

    /// Record a matched log line, keeping at most one entry per logical
    /// event and file. A repeat occurrence replaces the retained one only
    /// when its timestamp string is strictly greater; the replacement keeps
    /// the original slot position.
    ///
    /// The comparison is a plain string comparison of the raw timestamps,
    /// not a datetime comparison. Mixed timestamp formats can therefore pick
    /// a surprising "latest". Long-standing behavior, kept as is.
    pub fn record(
        &mut self,
        cleaner: &LineCleaner,
        time_format: &str,
        source_file: &str,
        category: &str,
        line: &str,
        line_number: usize,
    ) {
        let extraction = extract(line);
        let cleaned = cleaner.clean(extraction.message());
        let key = (source_file.to_string(), normalize(&cleaned));
        let ts = extraction.timestamp().to_string();
        let text = format!(
            "{line_number}: [{category}] {} - {cleaned}",
            format_timestamp(&ts, time_format)
        );

        match self.dedup.get(&key) {
            Some(&idx) => {
                let slot = &mut self.slots[idx];
                if slot.ts.as_deref().is_some_and(|stored| ts.as_str() > stored) {
                    slot.ts = Some(ts);
                    slot.text = text;
                }
            }
            None => {
                self.slots.push(Slot {
                    source_file: source_file.to_string(),
                    ts: Some(ts),
                    text,
                });
                self.dedup.insert(key, self.slots.len() - 1);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Current entries grouped by source file: files in first-seen order,
    /// entries within a file in insertion order, each reflecting the
    /// latest-seen version of its event.
    pub fn report(&self) -> Vec<(String, Vec<String>)> {
        let mut out: Vec<(String, Vec<String>)> = Vec::new();
        for slot in &self.slots {
            match out.iter_mut().find(|(file, _)| *file == slot.source_file) {
                Some((_, lines)) => lines.push(slot.text.clone()),
                None => out.push((slot.source_file.clone(), vec![slot.text.clone()])),
            }
        }
        out
    }

    /// All retained entries in insertion order, ungrouped.
    pub fn formatted_entries(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CleanerConfig;

    const TF: &str = "%Y-%m-%d %H:%M:%S";

    fn ledger_with(lines: &[&str]) -> PodErrorLedger {
        let cleaner = LineCleaner::new(CleanerConfig::default());
        let mut ledger = PodErrorLedger::new();
        for (i, line) in lines.iter().enumerate() {
            ledger.record(&cleaner, TF, "pod_cas.log", "Crashed", line, i + 1);
        }
        ledger
    }

    #[test]
    fn identical_lines_are_recorded_once() {
        let line = r#"{"message":"no ready CAS servers","timeStamp":"2024-01-01T00:00:00"}"#;
        let ledger = ledger_with(&[line, line]);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn newer_timestamp_replaces_the_retained_entry() {
        let ledger = ledger_with(&[
            r#"{"message":"no ready CAS servers","timeStamp":"2024-01-01T00:00:00"}"#,
            r#"{"message":"no ready CAS servers","timeStamp":"2024-01-02T00:00:00"}"#,
        ]);
        let entries = ledger.formatted_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("2024-01-02"));
        // The later line's number is kept along with its timestamp.
        assert!(entries[0].starts_with("2:"));
    }

    #[test]
    fn older_timestamp_is_discarded() {
        let ledger = ledger_with(&[
            r#"{"message":"no ready CAS servers","timeStamp":"2024-01-02T00:00:00"}"#,
            r#"{"message":"no ready CAS servers","timeStamp":"2024-01-01T00:00:00"}"#,
        ]);
        let entries = ledger.formatted_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("2024-01-02"));
        assert!(entries[0].starts_with("1:"));
    }

    #[test]
    fn volatile_substrings_do_not_defeat_dedup() {
        let ledger = ledger_with(&[
            "2024-01-01T00:00:01 connect to 10.0.0.5:8443 refused",
            "2024-01-01T00:00:02 connect to 10.0.0.9:9021 refused",
        ]);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn same_message_in_different_files_is_kept_per_file() {
        let cleaner = LineCleaner::new(CleanerConfig::default());
        let mut ledger = PodErrorLedger::new();
        let line = r#"{"message":"boom","timeStamp":"2024-01-01T00:00:00"}"#;
        ledger.record(&cleaner, TF, "a.log", "Crashed", line, 1);
        ledger.record(&cleaner, TF, "b.log", "Crashed", line, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn replacement_keeps_the_original_slot_position() {
        let cleaner = LineCleaner::new(CleanerConfig::default());
        let mut ledger = PodErrorLedger::new();
        ledger.record(
            &cleaner,
            TF,
            "a.log",
            "Crashed",
            r#"{"message":"first event","timeStamp":"2024-01-01T00:00:00"}"#,
            1,
        );
        ledger.record(
            &cleaner,
            TF,
            "a.log",
            "Crashed",
            r#"{"message":"second event","timeStamp":"2024-01-01T00:00:01"}"#,
            2,
        );
        ledger.record(
            &cleaner,
            TF,
            "a.log",
            "Crashed",
            r#"{"message":"first event","timeStamp":"2024-01-03T00:00:00"}"#,
            3,
        );
        let entries = ledger.formatted_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("first event"));
        assert!(entries[0].contains("2024-01-03"));
        assert!(entries[1].contains("second event"));
    }

    #[test]
    fn plain_appends_are_never_deduplicated() {
        let mut ledger = PodErrorLedger::new();
        ledger.add_line("get/pods.txt", "3: pod-x 0/1 CrashLoopBackOff 5 2d");
        ledger.add_line("get/pods.txt", "3: pod-x 0/1 CrashLoopBackOff 5 2d");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn report_groups_by_file_in_first_seen_order() {
        let mut ledger = PodErrorLedger::new();
        ledger.add_line("b.log", "one");
        ledger.add_line("a.log", "two");
        ledger.add_line("b.log", "three");
        let report = ledger.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].0, "b.log");
        assert_eq!(report[0].1, vec!["one".to_string(), "three".to_string()]);
        assert_eq!(report[1].0, "a.log");
    }
}
