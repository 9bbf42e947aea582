//! Config file read/write.

use crate::schema::FolioConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Folio config directory.
/// Priority: `FOLIO_CONFIG_DIR` env > `~/.folio/` > `./.folio`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOLIO_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".folio"),
        None => PathBuf::from(".folio"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<FolioConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(FolioConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(FolioConfig::default());
    }

    let config: FolioConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
///
/// The previous file, if any, is kept as `config.yaml.bak`.
pub async fn write_config(config: &FolioConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    if path.exists() {
        let bak = path.with_extension("yaml.bak");
        if let Err(e) = fs::copy(path, &bak).await {
            warn!("Failed to create backup {}: {}", bak.display(), e);
        }
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ServerConfig;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert!(cfg.server.is_none());
    }

    #[tokio::test]
    async fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        let mut cfg = FolioConfig::default();
        cfg.server = Some(ServerConfig { port: Some(9000), ..Default::default() });

        write_config(&cfg, &path).await.unwrap();
        write_config(&cfg, &path).await.unwrap();

        assert!(path.with_extension("yaml.bak").exists());
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded.port(), 9000);
    }

    #[tokio::test]
    async fn invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(&path, "server: [not, a, map]").await.unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
