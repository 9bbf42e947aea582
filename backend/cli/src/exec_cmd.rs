//! `folio exec`: run one terminal line in-process.

use std::path::Path;

use anyhow::Result;

use folio_commands::Terminal;
use folio_config::load_and_prepare;
use folio_gateway::terminal_settings;

use crate::bootstrap::open_database;

pub async fn run(config_path: &Path, line: &str) -> Result<()> {
    let config = load_and_prepare(config_path).await?;
    let db = open_database(&config).await?;

    let terminal = Terminal::with_defaults(
        db.commands.clone(),
        db.projects.clone(),
        &terminal_settings(&config),
    );
    let output = terminal.run(line).await?;
    println!("{output}");
    Ok(())
}
