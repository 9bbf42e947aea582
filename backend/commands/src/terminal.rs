/// Terminal facade: parse, resolve, execute, audit.
use std::sync::Arc;

use folio_core::{CommandDefinition, DocumentStore, FolioError, FolioResult, Project};
use folio_logging::{AuditEvent, AuditLogger};
use tracing::debug;

use crate::detection::detect_command;
use crate::dispatch::BuiltinRegistry;
use crate::executor::CommandExecutor;
use crate::handlers::{
    ClearHandler, HelpHandler, ProjectsHandler, SkillsHandler, DEFAULT_HELP_COLUMN_WIDTH,
};
use crate::resolver::CommandResolver;
use crate::skills::SKILLS_TEXT;
use crate::types::{not_found_message, Resolution};

/// Tunables for the built-in commands.
#[derive(Debug, Clone)]
pub struct TerminalSettings {
    pub help_column_width: usize,
    pub skills_text: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            help_column_width: DEFAULT_HELP_COLUMN_WIDTH,
            skills_text: SKILLS_TEXT.to_string(),
        }
    }
}

/// Registry with `help`, `projects`, `clear` and `skills` wired to the given stores.
pub fn build_default_registry(
    commands: Arc<dyn DocumentStore<CommandDefinition>>,
    projects: Arc<dyn DocumentStore<Project>>,
    settings: &TerminalSettings,
) -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();
    registry.register(
        "help",
        Arc::new(HelpHandler { commands, column_width: settings.help_column_width }),
    );
    registry.register("projects", Arc::new(ProjectsHandler { projects }));
    registry.register("clear", Arc::new(ClearHandler));
    registry.register("skills", Arc::new(SkillsHandler { text: settings.skills_text.clone() }));
    registry
}

pub struct Terminal {
    resolver: CommandResolver,
    executor: CommandExecutor,
}

impl Terminal {
    pub fn new(commands: Arc<dyn DocumentStore<CommandDefinition>>, builtins: BuiltinRegistry) -> Self {
        debug!(builtins = ?builtins.names(), "Terminal ready");
        Self {
            resolver: CommandResolver::new(commands),
            executor: CommandExecutor::new(builtins),
        }
    }

    /// Terminal with the default built-ins.
    pub fn with_defaults(
        commands: Arc<dyn DocumentStore<CommandDefinition>>,
        projects: Arc<dyn DocumentStore<Project>>,
        settings: &TerminalSettings,
    ) -> Self {
        let builtins = build_default_registry(commands.clone(), projects, settings);
        Self::new(commands, builtins)
    }

    /// Run one line of input. Blank input is the only error; everything else,
    /// unknown commands included, comes back as output text.
    pub async fn run(&self, raw: &str) -> FolioResult<String> {
        let inv = detect_command(raw).ok_or_else(|| FolioError::validation("Command is required"))?;

        let (output, kind, found) = match self.resolver.resolve(&inv).await? {
            Resolution::NotFound { name } => (not_found_message(&name), String::new(), false),
            Resolution::Found(resolved) => {
                let kind = resolved.kind().to_string();
                let output = self.executor.execute(&resolved, &inv).await.into_text();
                (output, kind, true)
            }
        };

        AuditLogger::log_event(AuditEvent::CommandExecuted { command: inv.name, kind, found });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{CommandKind, NewCommand, NewProject, ProjectType};
    use folio_query::Filter;
    use folio_store::MemoryCollection;

    use crate::registry::default_commands;

    async fn terminal() -> Terminal {
        let commands = Arc::new(MemoryCollection::<CommandDefinition>::new());
        for c in default_commands() {
            commands.insert(c.into_definition().unwrap()).await.unwrap();
        }
        commands
            .insert(NewCommand::new("hidden", CommandKind::Static).respond("x").inactive().into_definition().unwrap())
            .await
            .unwrap();

        let projects = Arc::new(MemoryCollection::<Project>::with_scope(Filter::new().eq("active", true)));
        let p = NewProject {
            title: "Folio".into(),
            description: "d".into(),
            short_description: "s".into(),
            project_type: ProjectType::Web,
            featured: true,
            ..Default::default()
        };
        projects.insert(p.into_project().unwrap()).await.unwrap();

        Terminal::with_defaults(commands, projects, &TerminalSettings::default())
    }

    #[tokio::test]
    async fn blank_input_is_a_validation_error() {
        let t = terminal().await;
        let err = t.run("   ").await.unwrap_err();
        assert!(matches!(err, FolioError::Validation(ref m) if m == "Command is required"));
    }

    #[tokio::test]
    async fn unknown_and_inactive_render_not_found() {
        let t = terminal().await;
        assert_eq!(
            t.run("sudo rm -rf").await.unwrap(),
            "Command not found: sudo. Type 'help' to see available commands."
        );
        assert_eq!(
            t.run("hidden").await.unwrap(),
            "Command not found: hidden. Type 'help' to see available commands."
        );
    }

    #[tokio::test]
    async fn end_to_end_defaults() {
        let t = terminal().await;
        assert_eq!(t.run("PWD").await.unwrap(), "/home/rey");
        assert_eq!(t.run("ll").await.unwrap(), "about.txt projects.txt skills.txt contact.txt");
        assert_eq!(t.run("clear").await.unwrap(), "CLEAR_TERMINAL");
        assert!(t.run("help").await.unwrap().contains("== SYSTEM =="));
        assert!(t.run("projects featured").await.unwrap().contains("Folio [Web]"));
        assert!(t.run("skills").await.unwrap().contains("== DevOps =="));
    }

    #[tokio::test]
    async fn skills_text_is_configurable() {
        let commands = Arc::new(MemoryCollection::<CommandDefinition>::new());
        commands
            .insert(NewCommand::new("skills", CommandKind::Dynamic).into_definition().unwrap())
            .await
            .unwrap();
        let projects = Arc::new(MemoryCollection::<Project>::new());
        let settings = TerminalSettings { skills_text: "Rust, SQL".into(), ..Default::default() };
        let t = Terminal::with_defaults(commands, projects, &settings);
        assert_eq!(t.run("skills").await.unwrap(), "Rust, SQL");
    }

    #[test]
    fn every_dynamic_default_has_a_builtin() {
        let registry = build_default_registry(
            Arc::new(MemoryCollection::<CommandDefinition>::new()),
            Arc::new(MemoryCollection::<Project>::new()),
            &TerminalSettings::default(),
        );
        for cmd in default_commands().iter().filter(|c| c.kind == CommandKind::Dynamic) {
            assert!(registry.contains(&cmd.name), "{}", cmd.name);
        }
        assert_eq!(registry.names(), vec!["clear", "help", "projects", "skills"]);
    }
}
