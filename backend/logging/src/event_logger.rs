//! Audit Event Logger
//!
//! Terminal executions, admin mutations and contact submissions, emitted on the
//! `audit` target so they can be routed or filtered separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEvent {
    CommandExecuted {
        command: String,
        kind: String,
        found: bool,
    },
    AdminMutation {
        collection: String,
        action: String,
        id: String,
    },
    ContactSubmitted {
        id: String,
        email: String,
        subject: String,
    },
}

impl AuditEvent {
    fn redact(&mut self) {
        match self {
            AuditEvent::CommandExecuted { command, .. } => {
                *command = redact_sensitive_data(command);
            }
            AuditEvent::AdminMutation { .. } => {}
            AuditEvent::ContactSubmitted { email, subject, .. } => {
                *email = redact_sensitive_data(email);
                *subject = redact_sensitive_data(subject);
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
}

pub struct AuditLogger;

impl AuditLogger {
    /// Redact the event's free-text fields and emit it as one structured line.
    pub fn log_event(mut event: AuditEvent) -> AuditEntry {
        event.redact();

        let entry = AuditEntry { timestamp: Utc::now(), event };
        let payload = serde_json::to_string(&entry.event).unwrap_or_default();
        info!(target: "audit", event = %payload, "Audit event");
        entry
    }
}
