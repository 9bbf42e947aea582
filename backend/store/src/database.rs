use std::sync::Arc;

use tracing::info;

use folio_core::{
    CommandDefinition, Contact, DocumentStore, FolioError, FolioResult, Project,
};
use folio_query::Filter;

use crate::collection::MemoryCollection;
use crate::seed::SeedData;

/// The three Folio collections, shareable across request handlers.
#[derive(Clone)]
pub struct Database {
    pub commands: Arc<MemoryCollection<CommandDefinition>>,
    pub projects: Arc<MemoryCollection<Project>>,
    pub contacts: Arc<MemoryCollection<Contact>>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(MemoryCollection::new()),
            // Inactive projects are invisible to every operation.
            projects: Arc::new(MemoryCollection::with_scope(Filter::new().eq("active", true))),
            contacts: Arc::new(MemoryCollection::new()),
        }
    }

    /// Load seed data. Commands are upserted by name; projects are inserted
    /// unless a project with the same slug already exists.
    pub async fn load_seed(&self, seed: SeedData) -> FolioResult<()> {
        let (mut commands, mut projects) = (0usize, 0usize);

        for new in seed.commands {
            let def = new.into_definition()?;
            match self.commands.find_one(&Filter::new().eq("name", def.name.as_str())).await? {
                Some(existing) => {
                    let mut updated = def;
                    updated.meta = existing.meta;
                    self.commands.replace(updated).await?;
                }
                None => {
                    self.commands.insert(def).await?;
                }
            }
            commands += 1;
        }

        for new in seed.projects {
            let project = new.into_project()?;
            match self.projects.insert(project).await {
                Ok(_) => projects += 1,
                Err(FolioError::Conflict(_)) => {}
                Err(e) => return Err(e),
            }
        }

        info!(commands, projects, "Loaded seed data");
        Ok(())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{CommandKind, NewCommand, NewProject};

    fn project(title: &str, active: bool) -> NewProject {
        NewProject {
            title: title.into(),
            description: "d".into(),
            short_description: "s".into(),
            active,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn inactive_projects_are_hidden() {
        let db = Database::new();
        db.load_seed(SeedData {
            commands: vec![],
            projects: vec![project("Visible", true), project("Hidden", false)],
        })
        .await
        .unwrap();
        let all = db.projects.find(&Filter::new(), &[]).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].slug, "visible");
    }

    #[tokio::test]
    async fn seeding_twice_upserts_commands() {
        let db = Database::new();
        let seed = || SeedData {
            commands: vec![NewCommand::new("hello", CommandKind::Static).respond("hi")],
            projects: vec![project("One", true)],
        };
        db.load_seed(seed()).await.unwrap();
        db.load_seed(seed()).await.unwrap();
        assert_eq!(db.commands.count(&Filter::new()).await.unwrap(), 1);
        assert_eq!(db.projects.count(&Filter::new()).await.unwrap(), 1);
    }
}
