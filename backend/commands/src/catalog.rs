/// Admin management of stored terminal commands.
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use folio_core::{CommandDefinition, CommandPatch, DocumentStore, FolioError, FolioResult, NewCommand};
use folio_query::{Filter, SortKey};

const NOT_FOUND: &str = "Command not found";

pub struct CommandCatalog {
    store: Arc<dyn DocumentStore<CommandDefinition>>,
}

impl CommandCatalog {
    pub fn new(store: Arc<dyn DocumentStore<CommandDefinition>>) -> Self {
        Self { store }
    }

    /// Every command, active or not, ordered by (category, order).
    pub async fn list(&self) -> FolioResult<Vec<CommandDefinition>> {
        self.store
            .find(&Filter::new(), &[SortKey::asc("category"), SortKey::asc("order")])
            .await
    }

    pub async fn get(&self, id: Uuid) -> FolioResult<CommandDefinition> {
        self.store.get(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))
    }

    async fn by_name(&self, name: &str) -> FolioResult<Option<CommandDefinition>> {
        self.store.find_one(&Filter::new().eq("name", name)).await
    }

    pub async fn create(&self, new: NewCommand) -> FolioResult<CommandDefinition> {
        let def = new.into_definition()?;
        if self.by_name(&def.name).await?.is_some() {
            return Err(FolioError::conflict("Command already exists"));
        }
        let created = self.store.insert(def).await?;
        info!(name = %created.name, kind = %created.kind, "Command created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: CommandPatch) -> FolioResult<CommandDefinition> {
        if let Some(name) = patch.normalized_name() {
            if let Some(existing) = self.by_name(&name).await? {
                if existing.meta.id != id {
                    return Err(FolioError::conflict("Command name already exists"));
                }
            }
        }
        let mut def = self.get(id).await?;
        patch.apply(&mut def)?;
        self.store.replace(def).await
    }

    pub async fn delete(&self, id: Uuid) -> FolioResult<CommandDefinition> {
        let removed = self.store.delete(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
        info!(name = %removed.name, "Command deleted");
        Ok(removed)
    }

    /// Upsert commands by name, keeping ids of existing entries. Returns the count written.
    pub async fn seed(&self, commands: Vec<NewCommand>) -> FolioResult<usize> {
        let mut written = 0;
        for new in commands {
            let def = new.into_definition()?;
            match self.by_name(&def.name).await? {
                Some(existing) => {
                    let mut updated = def;
                    updated.meta = existing.meta;
                    self.store.replace(updated).await?;
                }
                None => {
                    self.store.insert(def).await?;
                }
            }
            written += 1;
        }
        info!(written, "Seeded terminal commands");
        Ok(written)
    }
}
