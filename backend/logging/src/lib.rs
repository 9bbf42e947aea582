//! Structured logging for the Folio backend.
//!
//! Subscriber setup (console plus rolling NDJSON file), redaction of personal
//! data, and audit events for terminal use and admin changes.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{AuditEntry, AuditEvent, AuditLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
