//! Extraction of `(timestamp, message)` pairs from raw log lines.
//!
//! Structured (JSON object) lines are preferred; anything else falls back to
//! a positional split. Parse failure is an ordinary branch, never an error.

use serde_json::{Map, Value};
use similar::TextDiff;

/// Timestamp placeholder for lines that carry none.
pub const UNKNOWN_TIME: &str = "unknown-time";

/// `message`/`messageKey` fields at least this similar are the same message
/// written twice; the longer one wins instead of concatenating.
const MESSAGE_MERGE_SIMILARITY: f32 = 0.8;

/// What a raw log line turned out to be, decided once and never re-inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The trimmed line parsed as a JSON object.
    Structured { timestamp: String, message: String },
    /// Plain text: the first whitespace-delimited token is the timestamp.
    Plain { timestamp: String, message: String },
}

impl Extraction {
    pub fn timestamp(&self) -> &str {
        match self {
            Extraction::Structured { timestamp, .. } | Extraction::Plain { timestamp, .. } => {
                timestamp
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Extraction::Structured { message, .. } | Extraction::Plain { message, .. } => message,
        }
    }
}

/// Extract a timestamp and message from a raw log line. Total over arbitrary
/// input; malformed JSON simply takes the plain-text branch.
pub fn extract(line: &str) -> Extraction {
    let trimmed = line.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(fields)) => structured(&fields, trimmed),
        _ => plain(trimmed),
    }
}

fn structured(fields: &Map<String, Value>, raw: &str) -> Extraction {
    let message = fields.get("message").and_then(Value::as_str);
    let message_key = fields.get("messageKey").and_then(Value::as_str);

    let message = match (message, message_key) {
        (Some(m), Some(k)) if m != k => merge_message_pair(m, k),
        (Some(m), _) => m.to_string(),
        (None, Some(k)) => k.to_string(),
        (None, None) => raw.to_string(),
    };

    let timestamp = fields
        .get("timeStamp")
        .and_then(Value::as_str)
        .or_else(|| fields.get("ts").and_then(Value::as_str))
        .unwrap_or(UNKNOWN_TIME)
        .to_string();

    Extraction::Structured { timestamp, message }
}

fn plain(trimmed: &str) -> Extraction {
    let mut tokens = trimmed.split_whitespace();
    match tokens.next() {
        Some(first) => Extraction::Plain {
            timestamp: first.to_string(),
            message: tokens.collect::<Vec<_>>().join(" "),
        },
        None => Extraction::Plain {
            timestamp: UNKNOWN_TIME.to_string(),
            message: String::new(),
        },
    }
}

fn merge_message_pair(message: &str, key: &str) -> String {
    let ratio = TextDiff::from_chars(message, key).ratio();
    if ratio >= MESSAGE_MERGE_SIMILARITY || message.contains(key) || key.contains(message) {
        if message.len() >= key.len() {
            message.to_string()
        } else {
            key.to_string()
        }
    } else {
        format!("{message} | {key}")
    }
}
