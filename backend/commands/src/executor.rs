/// Command execution: turn a resolved command into output text.
///
/// Nothing here returns an error. Lookup misses and built-in failures are
/// rendered as output so the terminal always has something to show.
use tracing::{debug, warn};

use folio_core::CommandKind;

use crate::dispatch::BuiltinRegistry;
use crate::types::{AliasResolution, CommandInvocation, CommandOutput, ResolvedCommand};

pub struct CommandExecutor {
    builtins: BuiltinRegistry,
}

impl CommandExecutor {
    pub fn new(builtins: BuiltinRegistry) -> Self {
        Self { builtins }
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub async fn execute(&self, resolved: &ResolvedCommand, inv: &CommandInvocation) -> CommandOutput {
        let def = &resolved.definition;
        match def.kind {
            CommandKind::Static => CommandOutput::text(def.static_output()),
            CommandKind::Alias => Self::execute_alias(resolved.alias.as_ref()),
            CommandKind::Dynamic => self.execute_dynamic(resolved, inv).await,
            CommandKind::ScriptedAi => CommandOutput::Unimplemented(CommandKind::ScriptedAi),
        }
    }

    fn execute_alias(alias: Option<&AliasResolution>) -> CommandOutput {
        match alias {
            Some(AliasResolution::Target(target)) if target.kind == CommandKind::Static => {
                CommandOutput::text(target.static_output())
            }
            Some(AliasResolution::Target(target)) => {
                CommandOutput::text(format!("Alias target requires further resolution: {}", target.name))
            }
            Some(AliasResolution::Missing(name)) => {
                CommandOutput::text(format!("Alias target not found: {name}"))
            }
            Some(AliasResolution::Unconfigured) | None => CommandOutput::text("Invalid alias configuration"),
        }
    }

    async fn execute_dynamic(&self, resolved: &ResolvedCommand, inv: &CommandInvocation) -> CommandOutput {
        let name = resolved.name();
        let Some(handler) = self.builtins.get(name) else {
            let has_script = resolved
                .definition
                .script
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty());
            if has_script {
                warn!(command = %name, "Stored script ignored; script execution is disabled");
                return CommandOutput::text(format!("Script execution is disabled: {name}"));
            }
            return CommandOutput::text("Command processing not implemented");
        };

        debug!(command = %name, args = inv.args.len(), "Dispatching built-in");
        match handler.handle(inv).await {
            Ok(text) => CommandOutput::Text(text),
            Err(e) => {
                warn!(command = %name, error = %e, "Built-in command failed");
                CommandOutput::text(handler.failure_text())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use folio_core::{CommandDefinition, NewCommand};

    use crate::detection::detect_command;
    use crate::dispatch::BuiltinHandler;
    use crate::handlers::ClearHandler;

    fn def(cmd: NewCommand) -> CommandDefinition {
        cmd.into_definition().unwrap()
    }

    fn resolved(cmd: NewCommand, alias: Option<AliasResolution>) -> ResolvedCommand {
        ResolvedCommand { definition: def(cmd), alias }
    }

    async fn run(exec: &CommandExecutor, r: &ResolvedCommand, line: &str) -> String {
        exec.execute(r, &detect_command(line).unwrap()).await.into_text()
    }

    struct Broken;

    #[async_trait]
    impl BuiltinHandler for Broken {
        async fn handle(&self, _inv: &CommandInvocation) -> anyhow::Result<String> {
            Err(anyhow!("store offline"))
        }

        fn failure_text(&self) -> &str {
            "Error fetching widgets"
        }
    }

    #[tokio::test]
    async fn static_uses_response_or_placeholder() {
        let exec = CommandExecutor::new(BuiltinRegistry::new());
        let r = resolved(NewCommand::new("pwd", CommandKind::Static).respond("/home/rey"), None);
        assert_eq!(run(&exec, &r, "pwd").await, "/home/rey");

        let empty = resolved(NewCommand::new("blank", CommandKind::Static).respond(""), None);
        assert_eq!(run(&exec, &empty, "blank").await, "No output");
    }

    #[tokio::test]
    async fn alias_outcomes() {
        let exec = CommandExecutor::new(BuiltinRegistry::new());
        let alias = || NewCommand::new("ll", CommandKind::Alias).alias_of("ls");

        let target = def(NewCommand::new("ls", CommandKind::Static).respond("a.txt"));
        let r = resolved(alias(), Some(AliasResolution::Target(target)));
        assert_eq!(run(&exec, &r, "ll").await, "a.txt");

        let dynamic = def(NewCommand::new("ls", CommandKind::Dynamic));
        let r = resolved(alias(), Some(AliasResolution::Target(dynamic)));
        assert_eq!(run(&exec, &r, "ll").await, "Alias target requires further resolution: ls");

        let r = resolved(alias(), Some(AliasResolution::Missing("ls".into())));
        assert_eq!(run(&exec, &r, "ll").await, "Alias target not found: ls");

        let r = resolved(alias(), Some(AliasResolution::Unconfigured));
        assert_eq!(run(&exec, &r, "ll").await, "Invalid alias configuration");
    }

    #[tokio::test]
    async fn dynamic_dispatches_to_builtin() {
        let mut builtins = BuiltinRegistry::new();
        builtins.register("clear", Arc::new(ClearHandler));
        let exec = CommandExecutor::new(builtins);
        let r = resolved(NewCommand::new("clear", CommandKind::Dynamic), None);
        assert_eq!(run(&exec, &r, "clear now").await, "CLEAR_TERMINAL");
    }

    #[tokio::test]
    async fn builtin_failure_becomes_fallback_text() {
        let mut builtins = BuiltinRegistry::new();
        builtins.register("widgets", Arc::new(Broken));
        let exec = CommandExecutor::new(builtins);
        let r = resolved(NewCommand::new("widgets", CommandKind::Dynamic), None);
        assert_eq!(run(&exec, &r, "widgets").await, "Error fetching widgets");
    }

    #[tokio::test]
    async fn stored_scripts_are_never_run() {
        let exec = CommandExecutor::new(BuiltinRegistry::new());
        let mut cmd = NewCommand::new("joke", CommandKind::Dynamic);
        cmd.script = Some("(args) => 'haha'".into());
        let r = resolved(cmd, None);
        assert_eq!(run(&exec, &r, "joke").await, "Script execution is disabled: joke");

        let plain = resolved(NewCommand::new("noop", CommandKind::Dynamic), None);
        assert_eq!(run(&exec, &plain, "noop").await, "Command processing not implemented");
    }

    #[tokio::test]
    async fn ai_kind_is_unimplemented() {
        let exec = CommandExecutor::new(BuiltinRegistry::new());
        let r = resolved(NewCommand::new("ask", CommandKind::ScriptedAi), None);
        let out = exec.execute(&r, &detect_command("ask hi").unwrap()).await;
        assert_eq!(out, CommandOutput::Unimplemented(CommandKind::ScriptedAi));
        assert_eq!(out.into_text(), "AI command processing not yet implemented");
    }
}
