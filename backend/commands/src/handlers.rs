/// Built-in dynamic command handlers.
///
/// Each handler is a concrete struct implementing `BuiltinHandler`.
use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use folio_core::{CommandDefinition, DocumentStore, Project, ProjectType};
use folio_query::{Filter, SortKey};

use crate::dispatch::BuiltinHandler;
use crate::skills::SKILLS_TEXT;
use crate::types::{CommandInvocation, CLEAR_TERMINAL};

/// Width of the name column in `help` output.
pub const DEFAULT_HELP_COLUMN_WIDTH: usize = 15;

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub struct HelpHandler {
    pub commands: Arc<dyn DocumentStore<CommandDefinition>>,
    pub column_width: usize,
}

impl HelpHandler {
    pub fn new(commands: Arc<dyn DocumentStore<CommandDefinition>>) -> Self {
        Self { commands, column_width: DEFAULT_HELP_COLUMN_WIDTH }
    }

    fn render(&self, commands: &[CommandDefinition]) -> String {
        if commands.is_empty() {
            return "No commands available".to_string();
        }
        let width = self.column_width;
        let mut out = String::from("Available commands:\n\n");
        let mut current = None;
        for cmd in commands {
            if current != Some(cmd.category) {
                current = Some(cmd.category);
                let _ = write!(out, "\n== {} ==\n", cmd.category.as_str().to_uppercase());
            }
            let description = cmd
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description");
            let _ = writeln!(out, "{:<width$.width$} - {}", cmd.name, description);
        }
        out
    }
}

#[async_trait]
impl BuiltinHandler for HelpHandler {
    async fn handle(&self, inv: &CommandInvocation) -> Result<String> {
        let mut filter = Filter::new().eq("isActive", true);
        if let Some(category) = inv.args.first() {
            filter = filter.eq("category", category.to_lowercase().as_str());
        }
        let commands = self
            .commands
            .find(&filter, &[SortKey::asc("category"), SortKey::asc("order")])
            .await?;
        Ok(self.render(&commands))
    }

    fn failure_text(&self) -> &str {
        "Error fetching commands"
    }
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

pub struct ProjectsHandler {
    pub projects: Arc<dyn DocumentStore<Project>>,
}

impl ProjectsHandler {
    /// Filter selected by the first argument; unknown or absent means everything.
    pub fn filter_for(arg: Option<&str>) -> Filter {
        let by_type = |t: ProjectType| Filter::new().eq("projectType", t.as_str());
        match arg {
            Some("ai") => by_type(ProjectType::Ai),
            Some("web") => by_type(ProjectType::Web),
            Some("mobile") => by_type(ProjectType::Mobile),
            Some("featured") => Filter::new().eq("featured", true),
            _ => Filter::new(),
        }
    }

    fn render(projects: &[Project]) -> String {
        if projects.is_empty() {
            return "No projects found".to_string();
        }
        let mut out = String::from("Projects:\n\n");
        for p in projects {
            let kind = p.project_type.as_str();
            let _ = writeln!(out, "{} [{}]", p.title, kind);
            let _ = writeln!(out, "{}", "-".repeat(p.title.chars().count() + kind.len() + 3));
            let _ = writeln!(out, "{}", p.short_description);
            let _ = writeln!(out, "Technologies: {}", p.technologies.join(", "));
            if let Some(url) = p.github_url.as_deref().filter(|u| !u.is_empty()) {
                let _ = writeln!(out, "GitHub: {url}");
            }
            if let Some(url) = p.demo_url.as_deref().filter(|u| !u.is_empty()) {
                let _ = writeln!(out, "Demo: {url}");
            }
            out.push('\n');
        }
        out
    }
}

#[async_trait]
impl BuiltinHandler for ProjectsHandler {
    async fn handle(&self, inv: &CommandInvocation) -> Result<String> {
        let filter = Self::filter_for(inv.args.first().map(String::as_str));
        debug!(conditions = filter.conditions.len(), "Listing projects for terminal");
        let projects = self.projects.find(&filter, &[SortKey::asc("order")]).await?;
        Ok(Self::render(&projects))
    }

    fn failure_text(&self) -> &str {
        "Error fetching projects"
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

pub struct ClearHandler;

#[async_trait]
impl BuiltinHandler for ClearHandler {
    async fn handle(&self, _inv: &CommandInvocation) -> Result<String> {
        Ok(CLEAR_TERMINAL.to_string())
    }
}

// ---------------------------------------------------------------------------
// skills
// ---------------------------------------------------------------------------

pub struct SkillsHandler {
    pub text: String,
}

impl Default for SkillsHandler {
    fn default() -> Self {
        Self { text: SKILLS_TEXT.to_string() }
    }
}

#[async_trait]
impl BuiltinHandler for SkillsHandler {
    async fn handle(&self, _inv: &CommandInvocation) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detect_command;
    use folio_core::{CommandCategory, CommandKind, FolioError, FolioResult, NewCommand, NewProject};
    use folio_query::ListQuery;
    use folio_store::MemoryCollection;
    use serde_json::Value;
    use uuid::Uuid;

    async fn command_store(cmds: Vec<NewCommand>) -> Arc<MemoryCollection<CommandDefinition>> {
        let store = Arc::new(MemoryCollection::new());
        for c in cmds {
            store.insert(c.into_definition().unwrap()).await.unwrap();
        }
        store
    }

    fn project(title: &str, project_type: ProjectType, featured: bool, order: i64) -> NewProject {
        NewProject {
            title: title.into(),
            description: "long".into(),
            short_description: format!("{title} summary"),
            technologies: vec!["Rust".into(), "Tokio".into()],
            project_type,
            featured,
            order,
            ..Default::default()
        }
    }

    async fn project_store(items: Vec<NewProject>) -> Arc<MemoryCollection<Project>> {
        let store = Arc::new(MemoryCollection::with_scope(Filter::new().eq("active", true)));
        for p in items {
            store.insert(p.into_project().unwrap()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn help_groups_by_category_then_order() {
        let store = command_store(vec![
            NewCommand::new("b", CommandKind::Static).in_category(CommandCategory::Fun, 2),
            NewCommand::new("a", CommandKind::Static)
                .describe("first")
                .in_category(CommandCategory::Fun, 1),
            NewCommand::new("z", CommandKind::Static).in_category(CommandCategory::About, 5),
            NewCommand::new("gone", CommandKind::Static).inactive(),
        ])
        .await;
        let help = HelpHandler::new(store);
        let out = help.handle(&detect_command("help").unwrap()).await.unwrap();

        assert!(out.starts_with("Available commands:\n\n"));
        assert_eq!(out.matches("== FUN ==").count(), 1);
        let a = out.find("a               - first").unwrap();
        let b = out.find("b               - No description").unwrap();
        let about = out.find("== ABOUT ==").unwrap();
        assert!(about < a && a < b);
        assert!(!out.contains("gone"));
    }

    #[tokio::test]
    async fn help_filters_by_category_argument() {
        let store = command_store(vec![
            NewCommand::new("x", CommandKind::Static).in_category(CommandCategory::Fun, 1),
            NewCommand::new("y", CommandKind::Static).in_category(CommandCategory::System, 1),
        ])
        .await;
        let help = HelpHandler::new(store);
        let out = help.handle(&detect_command("help FUN").unwrap()).await.unwrap();
        assert!(out.contains("== FUN =="));
        assert!(!out.contains("== SYSTEM =="));

        let none = help.handle(&detect_command("help misc").unwrap()).await.unwrap();
        assert_eq!(none, "No commands available");
    }

    #[tokio::test]
    async fn help_truncates_long_names() {
        let store = command_store(vec![NewCommand::new(
            "averyveryverylongname",
            CommandKind::Static,
        )])
        .await;
        let help = HelpHandler::new(store);
        let out = help.handle(&detect_command("help").unwrap()).await.unwrap();
        assert!(out.contains("averyveryverylo - No description\n"));
    }

    #[tokio::test]
    async fn projects_render_in_order() {
        let store = project_store(vec![
            project("Second", ProjectType::Web, false, 2),
            project("First", ProjectType::Ai, true, 1),
            NewProject { active: false, ..project("Retired", ProjectType::Web, false, 0) },
        ])
        .await;
        let handler = ProjectsHandler { projects: store };
        let out = handler.handle(&detect_command("projects").unwrap()).await.unwrap();

        assert!(!out.contains("Retired"));

        let expected_first = "First [AI]\n----------\nFirst summary\nTechnologies: Rust, Tokio\n\n";
        assert!(out.starts_with("Projects:\n\n"));
        assert!(out.contains(expected_first));
        assert!(out.find("First [AI]").unwrap() < out.find("Second [Web]").unwrap());
    }

    #[tokio::test]
    async fn projects_featured_filter() {
        let store = project_store(vec![
            project("Plain", ProjectType::Web, false, 1),
            project("Star", ProjectType::Mobile, true, 2),
        ])
        .await;
        let handler = ProjectsHandler { projects: store };
        let out = handler.handle(&detect_command("projects featured").unwrap()).await.unwrap();
        assert!(out.contains("Star [Mobile]"));
        assert!(!out.contains("Plain"));

        let none = handler.handle(&detect_command("projects ai").unwrap()).await.unwrap();
        assert_eq!(none, "No projects found");
    }

    #[tokio::test]
    async fn projects_show_links_when_present() {
        let mut p = project("Linked", ProjectType::Web, false, 1);
        p.github_url = Some("https://github.com/x/linked".into());
        p.demo_url = Some("https://linked.example.com".into());
        let handler = ProjectsHandler { projects: project_store(vec![p]).await };
        let out = handler.handle(&detect_command("projects").unwrap()).await.unwrap();
        assert!(out.contains("GitHub: https://github.com/x/linked\nDemo: https://linked.example.com\n\n"));
    }

    struct FailingProjects;

    #[async_trait]
    impl DocumentStore<Project> for FailingProjects {
        async fn find(&self, _: &Filter, _: &[SortKey]) -> FolioResult<Vec<Project>> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn find_one(&self, _: &Filter) -> FolioResult<Option<Project>> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn find_page(&self, _: &ListQuery) -> FolioResult<Vec<Value>> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn count(&self, _: &Filter) -> FolioResult<u64> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn get(&self, _: Uuid) -> FolioResult<Option<Project>> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn insert(&self, _: Project) -> FolioResult<Project> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn replace(&self, _: Project) -> FolioResult<Project> {
            Err(FolioError::Storage("offline".into()))
        }
        async fn delete(&self, _: Uuid) -> FolioResult<Option<Project>> {
            Err(FolioError::Storage("offline".into()))
        }
    }

    #[tokio::test]
    async fn projects_store_failure_is_an_error_for_the_executor() {
        let handler = ProjectsHandler { projects: Arc::new(FailingProjects) };
        assert!(handler.handle(&detect_command("projects").unwrap()).await.is_err());
        assert_eq!(handler.failure_text(), "Error fetching projects");
    }

    #[tokio::test]
    async fn clear_ignores_arguments() {
        let out = ClearHandler.handle(&detect_command("clear --all now").unwrap()).await.unwrap();
        assert_eq!(out, "CLEAR_TERMINAL");
    }

    #[tokio::test]
    async fn skills_returns_configured_text() {
        let out = SkillsHandler::default().handle(&detect_command("skills").unwrap()).await.unwrap();
        assert!(out.contains("= Technical Skills ="));
        let custom = SkillsHandler { text: "Rust".into() };
        assert_eq!(custom.handle(&detect_command("skills").unwrap()).await.unwrap(), "Rust");
    }
}
