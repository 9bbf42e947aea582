//! Default contact notifier: records the submission in the log.
//!
//! Email delivery plugs in behind `ContactNotifier`; this one only logs.

use async_trait::async_trait;
use folio_core::{Contact, ContactNotifier};
use folio_logging::redact_sensitive_data;
use tracing::info;

pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn notify(&self, contact: &Contact) -> anyhow::Result<()> {
        info!(
            id = %contact.meta.id,
            from = %redact_sensitive_data(&contact.email),
            subject = %redact_sensitive_data(&contact.subject),
            "New contact submission"
        );
        Ok(())
    }
}
