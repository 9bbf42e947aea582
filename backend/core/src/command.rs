//! Terminal command definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::{Document, DocumentMeta};
use crate::error::{FolioError, FolioResult};

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// How a command produces its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Returns `responseText` verbatim.
    #[default]
    Static,
    /// Implemented by a registered built-in.
    Dynamic,
    /// Returns another command's static response (one hop only).
    Alias,
    /// Reserved for AI-backed responses; not implemented.
    #[serde(rename = "ai")]
    ScriptedAi,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [Self::Static, Self::Dynamic, Self::Alias, Self::ScriptedAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Alias => "alias",
            Self::ScriptedAi => "ai",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    #[default]
    General,
    Project,
    About,
    Skill,
    Fun,
    System,
}

impl CommandCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Project => "project",
            Self::About => "about",
            Self::Skill => "skill",
            Self::Fun => "fun",
            Self::System => "system",
        }
    }
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandCategory {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "project" => Ok(Self::Project),
            "about" => Ok(Self::About),
            "skill" => Ok(Self::Skill),
            "fun" => Ok(Self::Fun),
            "system" => Ok(Self::System),
            other => Err(FolioError::validation(format!("Unknown command category: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Definition
// ---------------------------------------------------------------------------

/// A persisted terminal command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDefinition {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    /// Unique, lower-cased command name.
    #[serde(alias = "command")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "response", skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: CommandKind,
    #[serde(default, alias = "aliasFor", skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<String>,
    /// Stored for compatibility only. Never executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category: CommandCategory,
    #[serde(default)]
    pub order: i64,
}

fn default_true() -> bool {
    true
}

impl Document for CommandDefinition {
    const COLLECTION: &'static str = "terminal_commands";
    const UNIQUE_FIELDS: &'static [&'static str] = &["name"];

    fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut DocumentMeta {
        &mut self.meta
    }
}

impl CommandDefinition {
    /// Check the invariants every stored command must satisfy.
    pub fn validate(&self) -> FolioResult<()> {
        if self.name.is_empty() {
            return Err(FolioError::validation("Command is required"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(FolioError::validation("Command name cannot contain whitespace"));
        }
        if self.kind == CommandKind::Alias
            && self.alias_target.as_deref().map(str::is_empty).unwrap_or(true)
        {
            return Err(FolioError::validation("Alias commands require an aliasTarget"));
        }
        Ok(())
    }

    /// The static response, or the fixed placeholder when empty.
    pub fn static_output(&self) -> &str {
        match self.response_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "No output",
        }
    }
}

/// Lower-case and trim a command name for storage and lookup.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Create / update payloads
// ---------------------------------------------------------------------------

/// Payload for creating a command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommand {
    #[serde(alias = "command")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "response")]
    pub response_text: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: CommandKind,
    #[serde(default, alias = "aliasFor")]
    pub alias_target: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category: CommandCategory,
    #[serde(default)]
    pub order: i64,
}

impl NewCommand {
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        Self { name: name.into(), kind, is_active: true, ..Default::default() }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn respond(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    pub fn alias_of(mut self, target: impl Into<String>) -> Self {
        self.alias_target = Some(target.into());
        self
    }

    pub fn in_category(mut self, category: CommandCategory, order: i64) -> Self {
        self.category = category;
        self.order = order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Normalize and validate into a storable definition.
    pub fn into_definition(self) -> FolioResult<CommandDefinition> {
        let def = CommandDefinition {
            meta: DocumentMeta::new(),
            name: normalize_name(&self.name),
            description: self.description.map(|d| d.trim().to_string()),
            response_text: self.response_text,
            kind: self.kind,
            alias_target: self.alias_target.map(|t| normalize_name(&t)),
            script: self.script,
            is_active: self.is_active,
            category: self.category,
            order: self.order,
        };
        def.validate()?;
        Ok(def)
    }
}

/// Partial update of a command. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPatch {
    #[serde(default, alias = "command")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "response")]
    pub response_text: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<CommandKind>,
    #[serde(default, alias = "aliasFor")]
    pub alias_target: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub category: Option<CommandCategory>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl CommandPatch {
    /// Normalized new name, if the patch renames the command.
    pub fn normalized_name(&self) -> Option<String> {
        self.name.as_deref().map(normalize_name)
    }

    pub fn apply(self, def: &mut CommandDefinition) -> FolioResult<()> {
        if let Some(name) = self.normalized_name() {
            def.name = name;
        }
        if let Some(d) = self.description {
            def.description = Some(d.trim().to_string());
        }
        if let Some(r) = self.response_text {
            def.response_text = Some(r);
        }
        if let Some(k) = self.kind {
            def.kind = k;
        }
        if let Some(t) = self.alias_target {
            def.alias_target = Some(normalize_name(&t));
        }
        if let Some(s) = self.script {
            def.script = Some(s);
        }
        if let Some(a) = self.is_active {
            def.is_active = a;
        }
        if let Some(c) = self.category {
            def.category = c;
        }
        if let Some(o) = self.order {
            def.order = o;
        }
        def.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_lower_cased_on_write() {
        let def = NewCommand::new("  HeLLo ", CommandKind::Static).into_definition().unwrap();
        assert_eq!(def.name, "hello");
        assert!(def.is_active);
        assert_eq!(def.category, CommandCategory::General);
    }

    #[test]
    fn alias_requires_target() {
        let err = NewCommand::new("ll", CommandKind::Alias).into_definition().unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)));
        let ok = NewCommand::new("ll", CommandKind::Alias).alias_of("LS").into_definition().unwrap();
        assert_eq!(ok.alias_target.as_deref(), Some("ls"));
    }

    #[test]
    fn accepts_legacy_field_names() {
        let json = serde_json::json!({
            "command": "ll",
            "type": "alias",
            "aliasFor": "ls",
            "category": "system"
        });
        let cmd: NewCommand = serde_json::from_value(json).unwrap();
        assert_eq!(cmd.name, "ll");
        assert_eq!(cmd.kind, CommandKind::Alias);
        assert_eq!(cmd.alias_target.as_deref(), Some("ls"));
        assert_eq!(cmd.category, CommandCategory::System);
        assert!(cmd.is_active);
    }

    #[test]
    fn ai_kind_uses_short_wire_name() {
        let kind: CommandKind = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(kind, CommandKind::ScriptedAi);
        assert_eq!(serde_json::to_string(&CommandKind::ScriptedAi).unwrap(), "\"ai\"");
    }

    #[test]
    fn empty_response_renders_placeholder() {
        let def = NewCommand::new("x", CommandKind::Static).respond("").into_definition().unwrap();
        assert_eq!(def.static_output(), "No output");
    }

    #[test]
    fn patch_revalidates() {
        let mut def = NewCommand::new("x", CommandKind::Static).into_definition().unwrap();
        let patch = CommandPatch { kind: Some(CommandKind::Alias), ..Default::default() };
        assert!(patch.apply(&mut def).is_err());
    }

    #[test]
    fn parses_categories() {
        assert_eq!("FUN".parse::<CommandCategory>().unwrap(), CommandCategory::Fun);
        assert!("misc".parse::<CommandCategory>().is_err());
    }
}
