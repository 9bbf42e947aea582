//! `folio config show|init`

use std::path::Path;

use anyhow::{bail, Result};

use folio_config::{apply_all_defaults, load_and_prepare, redacted_view, write_config, FolioConfig};

pub async fn show(config_path: &Path) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    println!("# {}", config_path.display());
    println!("{}", serde_json::to_string_pretty(&redacted_view(&config)?)?);
    Ok(())
}

pub async fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    let config = apply_all_defaults(FolioConfig::default());
    write_config(&config, config_path).await?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
