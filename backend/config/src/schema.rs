//! Folio runtime configuration schema.
//!
//! Every section is optional so a partial `config.yaml` parses; accessors
//! fall back to the defaults in [`crate::defaults`].

use folio_query::ListingProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{
    DEFAULT_BIND, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEFAULT_RATE_LIMIT_MAX,
    DEFAULT_RATE_LIMIT_WINDOW_SECS,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolioConfig {
    /// HTTP listener
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Admin authorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,

    /// Built-in terminal command tunables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<TerminalConfig>,

    /// Per-collection listing profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing: Option<ListingConfig>,

    /// Seed data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Browser origins allowed to call the API, e.g. `https://example.com`.
    /// Unset means any origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `trace` | `debug` | `info` | `warn` | `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// JSON lines on the console as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Bearer token accepted on admin routes. Usually `${FOLIO_ADMIN_TOKEN}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_column_width: Option<usize>,
    /// Replaces the built-in `skills` text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<ListingProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ListingProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// YAML file with `commands` and `projects` lists, loaded at start-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
    /// Load the stock command set when no seed file is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_defaults: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_secs: Option<u64>,
    /// Key clients on the first `X-Forwarded-For` entry instead of the
    /// socket peer. Only safe behind a proxy that overwrites the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_forwarded_for: Option<bool>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl FolioConfig {
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Configured admin token, ignoring blanks.
    pub fn admin_token(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|a| a.admin_token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn projects_listing(&self) -> ListingProfile {
        self.listing
            .as_ref()
            .and_then(|l| l.projects.clone())
            .unwrap_or_else(ListingProfile::projects)
    }

    pub fn contacts_listing(&self) -> ListingProfile {
        self.listing
            .as_ref()
            .and_then(|l| l.contacts.clone())
            .unwrap_or_else(ListingProfile::contacts)
    }

    pub fn seed_file(&self) -> Option<&PathBuf> {
        self.store.as_ref().and_then(|s| s.seed_file.as_ref())
    }

    pub fn seed_defaults(&self) -> bool {
        self.store.as_ref().and_then(|s| s.seed_defaults).unwrap_or(true)
    }

    /// Allowed CORS origins; empty means any origin.
    pub fn cors_origins(&self) -> &[String] {
        self.server
            .as_ref()
            .and_then(|s| s.cors_origins.as_deref())
            .unwrap_or_default()
    }

    pub fn trust_forwarded_for(&self) -> bool {
        self.rate_limit
            .as_ref()
            .and_then(|r| r.trust_forwarded_for)
            .unwrap_or(false)
    }

    /// `(max_requests, window_secs)`
    pub fn rate_limit(&self) -> (u32, u64) {
        let rl = self.rate_limit.as_ref();
        (
            rl.and_then(|r| r.max_requests).unwrap_or(DEFAULT_RATE_LIMIT_MAX),
            rl.and_then(|r| r.window_secs).unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS),
        )
    }
}
