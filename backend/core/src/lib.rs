pub mod command;
pub mod contact;
pub mod document;
pub mod error;
pub mod project;
pub mod traits;

pub use command::{CommandCategory, CommandDefinition, CommandKind, CommandPatch, NewCommand};
pub use contact::{Contact, ContactForm, ContactStatus, ContactUpdate};
pub use document::{Document, DocumentMeta};
pub use error::{FolioError, FolioResult};
pub use project::{slugify, NewProject, Project, ProjectPatch, ProjectType};
pub use traits::{ContactNotifier, DocumentStore};
