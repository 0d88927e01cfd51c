//! Lenient repair for hand-edited pattern files: unescaped quotes inside
//! quoted strings and trailing commas are common enough to fix rather than
//! reject.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Three or more quote-delimited runs on one line is the shape an unescaped
// inner quote leaves behind, e.g. `"check "endpoint" failed"`.
static SUSPECT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"".*".*".*""#).unwrap());

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",(\s*[}\]])").unwrap());

/// Escape the second and third quote of each suspect fragment (the inner
/// pair), leaving the delimiters alone.
fn escape_inner_quotes(fragment: &str) -> String {
    let mut seen = 0;
    let mut out = String::with_capacity(fragment.len() + 2);
    for ch in fragment.chars() {
        if ch == '"' {
            seen += 1;
            if seen == 2 || seen == 3 {
                out.push('\\');
            }
        }
        out.push(ch);
    }
    out
}

pub(super) fn repair_json(content: &str) -> String {
    let escaped = SUSPECT.replace_all(content, |caps: &Captures| escape_inner_quotes(&caps[0]));
    TRAILING_COMMA.replace_all(&escaped, "$1").into_owned()
}
