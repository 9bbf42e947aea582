/// Built-in dispatch: route dynamic commands to handlers registered at start-up.
///
/// This replaces executing stored scripts. A dynamic command only does
/// something if a handler with its exact name was registered in code.
use anyhow::Result;
use async_trait::async_trait;

use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait BuiltinHandler: Send + Sync {
    /// Produce the command's output. Errors are rendered via `failure_text`.
    async fn handle(&self, inv: &CommandInvocation) -> Result<String>;

    /// Output shown when `handle` fails.
    fn failure_text(&self) -> &str {
        "Error running command"
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

use std::collections::HashMap;
use std::sync::Arc;

/// Closed name → handler map for dynamic commands.
pub struct BuiltinRegistry {
    handlers: HashMap<String, Arc<dyn BuiltinHandler>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn BuiltinHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn BuiltinHandler>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ClearHandler;

    #[test]
    fn registers_by_exact_name() {
        let mut registry = BuiltinRegistry::new();
        registry.register("clear", Arc::new(ClearHandler));
        assert!(registry.contains("clear"));
        assert!(!registry.contains("CLEAR"));
        assert_eq!(registry.names(), vec!["clear"]);
    }
}
