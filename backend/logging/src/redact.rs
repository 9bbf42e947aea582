//! Log Redaction
//!
//! Scrubs email addresses, phone numbers and bearer tokens before they reach a log line.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());
static BEARER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = EMAIL_RE.replace_all(&redacted, "[REDACTED_EMAIL]");
    TELEPHONE_RE.replace_all(&redacted, "[REDACTED_PHONE]").into_owned()
}
