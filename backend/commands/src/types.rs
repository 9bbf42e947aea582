/// Terminal command invocation and resolution types.
use folio_core::{CommandDefinition, CommandKind};

/// Sentinel returned by `clear`; the client erases its visible history.
pub const CLEAR_TERMINAL: &str = "CLEAR_TERMINAL";

// ---------------------------------------------------------------------------
// Parsed invocation
// ---------------------------------------------------------------------------

/// A parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Lower-cased first token.
    pub name: String,
    /// Remaining whitespace-separated tokens.
    pub args: Vec<String>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of looking up an invocation in the command store.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(ResolvedCommand),
    NotFound { name: String },
}

/// An active command, with its alias target looked up when it is an alias.
#[derive(Debug, Clone)]
pub struct ResolvedCommand {
    pub definition: CommandDefinition,
    /// Set only for `CommandKind::Alias`.
    pub alias: Option<AliasResolution>,
}

impl ResolvedCommand {
    pub fn kind(&self) -> CommandKind {
        self.definition.kind
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Result of the single alias hop. Targets are never resolved further.
#[derive(Debug, Clone)]
pub enum AliasResolution {
    Target(CommandDefinition),
    Missing(String),
    Unconfigured,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Text(String),
    /// The command kind has no implementation.
    Unimplemented(CommandKind),
}

impl CommandOutput {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unimplemented(CommandKind::ScriptedAi) => {
                "AI command processing not yet implemented".to_string()
            }
            Self::Unimplemented(kind) => format!("{kind} command processing not yet implemented"),
        }
    }
}

/// Message rendered for an unknown or inactive command.
pub fn not_found_message(name: &str) -> String {
    format!("Command not found: {name}. Type 'help' to see available commands.")
}
