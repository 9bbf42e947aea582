//! Environment variable handling for config values.
//!
//! `${VAR_NAME}` in string values is resolved at load time. Only uppercase
//! `[A-Z_][A-Z0-9_]*` names are matched and `$${VAR}` escapes to a literal
//! `${VAR}`. A handful of `FOLIO_*` variables also override fields directly.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{AuthConfig, FolioConfig, ServerConfig};

/// A reference, optionally preceded by the `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. A referenced variable that is unset or
/// empty is an error.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut error: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &regex::Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                error.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = error {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// All env var names referenced in a config value tree, sorted.
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    let mut vars = Vec::new();
    collect_vars_recursive(value, &mut vars);
    vars.sort();
    vars.dedup();
    vars
}

fn collect_vars_recursive(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            for caps in ENV_VAR_PATTERN.captures_iter(s) {
                if caps[1].is_empty() {
                    out.push(caps[2].to_string());
                }
            }
        }
        Value::Array(arr) => arr.iter().for_each(|v| collect_vars_recursive(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_vars_recursive(v, out)),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Direct overrides
// ---------------------------------------------------------------------------

pub const ENV_PORT: &str = "FOLIO_PORT";
pub const ENV_BIND: &str = "FOLIO_BIND";
pub const ENV_ADMIN_TOKEN: &str = "FOLIO_ADMIN_TOKEN";
/// Comma-separated list of allowed CORS origins.
pub const ENV_CORS_ORIGINS: &str = "FOLIO_CORS_ORIGINS";

/// Apply the `FOLIO_*` overrides from the process environment.
pub fn apply_env_overrides(config: FolioConfig) -> Result<FolioConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

pub fn apply_env_overrides_with(
    mut config: FolioConfig,
    env: &HashMap<String, String>,
) -> Result<FolioConfig> {
    let non_empty = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(port) = non_empty(ENV_PORT) {
        let port: u16 = port
            .parse()
            .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(bind) = non_empty(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind.to_string());
    }
    if let Some(token) = non_empty(ENV_ADMIN_TOKEN) {
        config.auth.get_or_insert_with(AuthConfig::default).admin_token = Some(token.to_string());
    }
    if let Some(origins) = non_empty(ENV_CORS_ORIGINS) {
        let origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
        config.server.get_or_insert_with(ServerConfig::default).cors_origins = Some(origins);
    }
    Ok(config)
}
