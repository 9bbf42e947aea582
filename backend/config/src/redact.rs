//! Config redaction: mask secrets before a config is displayed or logged.

use serde_json::Value;

static SENSITIVE_KEYS: &[&str] = &["adminToken", "admin_token", "token", "secret", "password"];

/// Redact a config JSON value, replacing sensitive fields with a short hint plus `***`.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if !is_sensitive_key(key) || s.is_empty() {
        return Value::String(s.to_string());
    }
    let hint: String = if s.chars().count() > 8 { s.chars().take(2).collect() } else { String::new() };
    Value::String(format!("{hint}***"))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_admin_token() {
        let v = json!({ "auth": { "adminToken": "super-long-admin-token" } });
        let redacted = redact(&v);
        assert_eq!(redacted["auth"]["adminToken"], "su***");
    }

    #[test]
    fn short_secrets_get_no_hint() {
        let v = json!({ "password": "abc" });
        assert_eq!(redact(&v)["password"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" }, "server": { "port": 5000 } });
        let redacted = redact(&v);
        assert_eq!(redacted, v);
    }
}
