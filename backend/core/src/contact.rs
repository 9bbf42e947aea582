//! Contact-form submissions.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::{Document, DocumentMeta};
use crate::error::{FolioError, FolioResult};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Spam,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [Self::New, Self::Read, Self::Replied, Self::Spam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Spam => "spam",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub replied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_date: Option<DateTime<Utc>>,
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }
}

/// Public contact-form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    /// Accepted for client compatibility; verification is delegated upstream.
    #[serde(default)]
    pub recaptcha_token: Option<String>,
}

impl ContactForm {
    /// Trim, lower-case the email, validate, and build a new `Contact`.
    pub fn into_contact(
        self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> FolioResult<Contact> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let subject = self.subject.trim().to_string();
        let message = self.message.trim().to_string();

        let mut problems = Vec::new();
        if name.is_empty() {
            problems.push("Name is required");
        }
        if email.is_empty() {
            problems.push("Email is required");
        } else if !EMAIL_RE.is_match(&email) {
            problems.push("Please provide a valid email");
        }
        if subject.is_empty() {
            problems.push("Subject is required");
        }
        if message.is_empty() {
            problems.push("Message is required");
        }
        if !problems.is_empty() {
            return Err(FolioError::validation(format!(
                "Invalid input data. {}",
                problems.join(". ")
            )));
        }

        Ok(Contact {
            meta: DocumentMeta::new(),
            name,
            email,
            subject,
            message,
            status: ContactStatus::New,
            ip_address,
            user_agent,
            replied: false,
            reply_date: None,
        })
    }
}

/// Admin update. Only `status` and `replied` are honoured; other keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub replied: Option<bool>,
}

impl ContactUpdate {
    pub fn apply(self, contact: &mut Contact) {
        if let Some(status) = self.status {
            contact.status = status;
        }
        if let Some(replied) = self.replied {
            contact.replied = replied;
            if replied {
                contact.reply_date = Some(Utc::now());
            }
        }
    }
}
