//! Folio HTTP API
//!
//! Public terminal, project and contact endpoints plus the admin surface,
//! all served from one axum router.

pub mod admin_api;
pub mod auth;
pub mod contacts_api;
pub mod error;
pub mod health_api;
pub mod listing;
pub mod notifier;
pub mod projects_api;
pub mod rate_limit;
pub mod server;
pub mod terminal_api;

pub use error::{ApiError, ApiResult};
pub use notifier::LogNotifier;
pub use server::{build_router, start_server, terminal_settings, AppState};
