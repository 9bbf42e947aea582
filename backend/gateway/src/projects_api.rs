//! Project endpoints. Reads are public; writes need the admin token.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use folio_core::{DocumentStore, FolioError, NewProject, Project, ProjectPatch};
use folio_logging::{AuditEvent, AuditLogger};
use folio_query::Filter;

use crate::auth::RequireAdmin;
use crate::error::{parse_id, ApiResult};
use crate::listing::list_page;
use crate::server::AppState;

const NOT_FOUND: &str = "No project found with that ID";

fn audit(action: &str, id: Uuid) {
    AuditLogger::log_event(AuditEvent::AdminMutation {
        collection: "projects".into(),
        action: action.into(),
        id: id.to_string(),
    });
}

fn project_body(project: &Project) -> Json<Value> {
    Json(json!({ "status": "success", "data": { "project": project } }))
}

/// `GET /api/projects`
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let body = list_page::<Project>(&*state.db.projects, &params, &state.projects_listing, "projects").await?;
    Ok(Json(body))
}

/// `GET /api/projects/:id` where `:id` is a UUID or a slug.
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id_or_slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let projects = &state.db.projects;
    let found = match Uuid::parse_str(&id_or_slug) {
        Ok(id) => projects.get(id).await?,
        Err(_) => {
            let slug = id_or_slug.to_lowercase();
            projects.find_one(&Filter::new().eq("slug", slug.as_str())).await?
        }
    };
    let project = found.ok_or_else(|| FolioError::not_found("No project found with that ID or slug"))?;
    Ok(project_body(&project))
}

/// `POST /api/projects`
pub async fn create_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(new) = body?;
    let project = state.db.projects.insert(new.into_project()?).await?;
    audit("create", project.meta.id);
    Ok((StatusCode::CREATED, project_body(&project)))
}

/// `PATCH /api/projects/:id`
pub async fn update_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ProjectPatch>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(patch) = body?;
    let id = parse_id(&id, NOT_FOUND)?;
    let mut project = state.db.projects.get(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
    patch.apply(&mut project)?;
    let project = state.db.projects.replace(project).await?;
    audit("update", id);
    Ok(project_body(&project))
}

/// `DELETE /api/projects/:id`
pub async fn delete_project(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.db.projects.delete(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
    audit("delete", id);
    Ok(StatusCode::NO_CONTENT)
}
