//! Terminal command interpreter for the Folio backend.
//!
//! Input is parsed by [`detect_command`], looked up by [`CommandResolver`]
//! (one alias hop at most) and run by [`CommandExecutor`]. Dynamic commands
//! only reach code registered in a [`BuiltinRegistry`]; stored scripts are
//! kept for reference and never evaluated.

pub mod catalog;
pub mod detection;
pub mod dispatch;
pub mod executor;
pub mod handlers;
pub mod registry;
pub mod resolver;
pub mod skills;
pub mod terminal;
pub mod types;

pub use catalog::CommandCatalog;
pub use detection::detect_command;
pub use dispatch::{BuiltinHandler, BuiltinRegistry};
pub use executor::CommandExecutor;
pub use handlers::{ClearHandler, HelpHandler, ProjectsHandler, SkillsHandler};
pub use registry::default_commands;
pub use resolver::CommandResolver;
pub use skills::SKILLS_TEXT;
pub use terminal::{build_default_registry, Terminal, TerminalSettings};
pub use types::{
    not_found_message, AliasResolution, CommandInvocation, CommandOutput, Resolution,
    ResolvedCommand, CLEAR_TERMINAL,
};
