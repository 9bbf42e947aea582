/// Command resolution: name lookup among active commands, plus a single alias hop.
use std::sync::Arc;

use tracing::debug;

use folio_core::{CommandDefinition, CommandKind, DocumentStore, FolioResult};
use folio_query::Filter;

use crate::types::{AliasResolution, CommandInvocation, Resolution, ResolvedCommand};

pub struct CommandResolver {
    store: Arc<dyn DocumentStore<CommandDefinition>>,
}

impl CommandResolver {
    pub fn new(store: Arc<dyn DocumentStore<CommandDefinition>>) -> Self {
        Self { store }
    }

    /// Exact, case-insensitive lookup among active commands.
    pub async fn find_active(&self, name: &str) -> FolioResult<Option<CommandDefinition>> {
        let filter = Filter::new()
            .eq("name", name.to_lowercase().as_str())
            .eq("isActive", true);
        self.store.find_one(&filter).await
    }

    /// Resolve an invocation. Aliases get exactly one extra lookup; an alias
    /// pointing at another alias is reported, not followed.
    pub async fn resolve(&self, inv: &CommandInvocation) -> FolioResult<Resolution> {
        let Some(definition) = self.find_active(&inv.name).await? else {
            debug!(name = %inv.name, "Command not found");
            return Ok(Resolution::NotFound { name: inv.name.clone() });
        };

        let alias = if definition.kind == CommandKind::Alias {
            Some(match definition.alias_target.as_deref().filter(|t| !t.is_empty()) {
                None => AliasResolution::Unconfigured,
                Some(target) => match self.find_active(target).await? {
                    Some(def) => AliasResolution::Target(def),
                    None => AliasResolution::Missing(target.to_string()),
                },
            })
        } else {
            None
        };

        Ok(Resolution::Found(ResolvedCommand { definition, alias }))
    }
}
