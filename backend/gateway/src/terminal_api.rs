//! Terminal endpoint and admin command management.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use folio_core::{CommandPatch, NewCommand};
use folio_logging::{AuditEvent, AuditLogger};

use crate::auth::RequireAdmin;
use crate::error::{parse_id, ApiResult};
use crate::server::AppState;

const NOT_FOUND: &str = "Command not found";

#[derive(Debug, Default, Deserialize)]
pub struct TerminalRequest {
    #[serde(default)]
    pub command: Option<String>,
}

/// `POST /api/terminal`
pub async fn run_command(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TerminalRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = body?;
    let output = state.terminal.run(req.command.as_deref().unwrap_or_default()).await?;
    Ok(Json(json!({ "status": "success", "data": { "output": output } })))
}

fn audit(action: &str, id: impl ToString) {
    AuditLogger::log_event(AuditEvent::AdminMutation {
        collection: "terminal_commands".into(),
        action: action.into(),
        id: id.to_string(),
    });
}

/// `GET /api/terminal/commands`
pub async fn list_commands(_admin: RequireAdmin, State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let commands = state.catalog.list().await?;
    Ok(Json(json!({
        "status": "success",
        "results": commands.len(),
        "data": { "commands": commands },
    })))
}

/// `GET /api/terminal/commands/:id`
pub async fn get_command(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let command = state.catalog.get(parse_id(&id, NOT_FOUND)?).await?;
    Ok(Json(json!({ "status": "success", "data": { "command": command } })))
}

/// `POST /api/terminal/commands`
pub async fn create_command(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(new) = body?;
    let command = state.catalog.create(new).await?;
    audit("create", command.meta.id);
    Ok((StatusCode::CREATED, Json(json!({ "status": "success", "data": { "command": command } }))))
}

/// `PATCH /api/terminal/commands/:id`
pub async fn update_command(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<CommandPatch>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(patch) = body?;
    let command = state.catalog.update(parse_id(&id, NOT_FOUND)?, patch).await?;
    audit("update", command.meta.id);
    Ok(Json(json!({ "status": "success", "data": { "command": command } })))
}

/// `DELETE /api/terminal/commands/:id`
pub async fn delete_command(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.catalog.delete(parse_id(&id, NOT_FOUND)?).await?;
    audit("delete", removed.meta.id);
    Ok(StatusCode::NO_CONTENT)
}
