//! Store set-up shared by `serve` and `exec`.

use anyhow::Result;
use tracing::info;

use folio_commands::default_commands;
use folio_config::FolioConfig;
use folio_store::{load_seed_file, sample_projects, Database, SeedData};

/// Build a fresh store and load the configured seed data.
///
/// A seed file wins; otherwise the stock commands and sample projects are
/// loaded unless `store.seedDefaults` is false.
pub async fn open_database(config: &FolioConfig) -> Result<Database> {
    let db = Database::new();

    let seed = match config.seed_file() {
        Some(path) => Some(load_seed_file(path).await?),
        None if config.seed_defaults() => Some(SeedData {
            commands: default_commands(),
            projects: sample_projects(),
        }),
        None => None,
    };

    match seed {
        Some(seed) => db.load_seed(seed).await?,
        None => info!("Starting with an empty store"),
    }
    Ok(db)
}
