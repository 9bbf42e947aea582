//! `folio-config`: runtime configuration for the Folio backend.
//!
//! Provides:
//! - Typed config schema (server, logging, auth, terminal, listing, store, rate limit)
//! - YAML read/write
//! - `${ENV_VAR}` substitution and `FOLIO_*` overrides
//! - Default value application
//! - Validation with warnings
//! - Redaction for display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, collect_referenced_vars, resolve_env_vars,
    resolve_env_vars_with, MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use redact::redact;
pub use schema::FolioConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// Warnings are logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<FolioConfig> {
    let raw_config = load_config(path).await?;

    let value: Value =
        serde_json::to_value(&raw_config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: FolioConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if let Some(first) = report.errors.first() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{first} ({} error(s) total)", report.errors.len());
    }

    Ok(config)
}

/// Redacted JSON view of a config, safe to print.
pub fn redacted_view(config: &FolioConfig) -> Result<Value> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;
    Ok(redact(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepares_missing_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_and_prepare(&dir.path().join("config.yaml")).await.unwrap();
        assert!(cfg.server.is_some());
        assert!(cfg.listing.as_ref().unwrap().contacts.is_some());
    }

    #[tokio::test]
    async fn invalid_config_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "rateLimit:\n  maxRequests: 0\n").await.unwrap();
        let err = load_and_prepare(&path).await.unwrap_err();
        assert!(err.to_string().contains("rateLimit.maxRequests"));
    }

    #[test]
    fn redacted_view_hides_token() {
        let mut cfg = FolioConfig::default();
        cfg.auth = Some(schema::AuthConfig { admin_token: Some("abcdefghijkl".into()) });
        let view = redacted_view(&cfg).unwrap();
        assert_eq!(view["auth"]["adminToken"], "ab***");
    }
}
