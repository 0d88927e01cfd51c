//! Substitution of volatile substrings so that semantically identical log
//! events compare equal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::types::CleanerConfig;

static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d{2}|[1-9]?\d)\b")
        .unwrap()
});

static PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r":[1-9]\d{0,4}\b").unwrap());

static JOB_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"The job "\d+" has been terminated through the REST API\."#).unwrap()
});

static JOB_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"job ID '\d+'").unwrap());

static POD_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}-")
        .unwrap()
});

static DATETIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}(?:\.\d+)?").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Applies the enabled substitution rules in a fixed order. The rules target
/// disjoint lexical patterns and are idempotent.
#[derive(Debug, Clone, Default)]
pub struct LineCleaner {
    rules: CleanerConfig,
}

impl LineCleaner {
    pub fn new(rules: CleanerConfig) -> Self {
        Self { rules }
    }

    pub fn clean(&self, line: &str) -> String {
        let mut out = line.to_string();
        if self.rules.ip_address {
            out = IP_ADDRESS.replace_all(&out, "IP_ADDRESS").into_owned();
        }
        if self.rules.port {
            out = PORT.replace_all(&out, ":PORT").into_owned();
        }
        if self.rules.job_number {
            out = JOB_NUMBER
                .replace_all(
                    &out,
                    r#"The job "JOB_NUMBER" has been terminated through the REST API."#,
                )
                .into_owned();
        }
        if self.rules.job_id {
            out = JOB_ID.replace_all(&out, "job ID 'JOB_ID'").into_owned();
        }
        if self.rules.pod_id {
            out = POD_ID.replace_all(&out, "-POD_ID-").into_owned();
        }
        out
    }
}

/// Canonical form used for dedup keys, never for display: datetimes fold to
/// `DATETIME`, whitespace runs collapse to a single space.
pub fn normalize(message: &str) -> String {
    let folded = DATETIME.replace_all(message, "DATETIME");
    let collapsed = WHITESPACE.replace_all(&folded, " ");
    collapsed.trim().to_string()
}
