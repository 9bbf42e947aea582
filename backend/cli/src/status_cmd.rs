//! `folio status`: ask a running server for its health report.

use std::path::Path;

use anyhow::Result;

use folio_config::load_and_prepare;

pub async fn run(config_path: &Path, port: Option<u16>) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    let port = port.unwrap_or_else(|| config.port());

    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("Folio is not running on port {port}");
        }
    }
    Ok(())
}
