//! Admin dashboard: collection statistics and command seeding.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use folio_commands::default_commands;
use folio_core::{CommandKind, ContactStatus, DocumentStore, FolioResult, ProjectType};
use folio_query::Filter;

use crate::auth::RequireAdmin;
use crate::error::ApiResult;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: u64,
    pub featured: u64,
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
pub struct ContactStats {
    pub total: u64,
    pub new: u64,
    pub read: u64,
    pub replied: u64,
    pub spam: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandStats {
    pub total: u64,
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub projects: ProjectStats,
    pub contacts: ContactStats,
    pub terminal_commands: CommandStats,
}

async fn collect_stats(state: &AppState) -> FolioResult<DashboardStats> {
    let db = &state.db;

    let mut project_types = BTreeMap::new();
    for ty in ProjectType::ALL {
        let n = db.projects.count(&Filter::new().eq("projectType", ty.as_str())).await?;
        project_types.insert(ty.as_str().to_string(), n);
    }

    let mut by_status = HashMap::new();
    for status in ContactStatus::ALL {
        by_status.insert(status, db.contacts.count(&Filter::new().eq("status", status.as_str())).await?);
    }
    let status_count = |s: ContactStatus| by_status.get(&s).copied().unwrap_or(0);

    let mut command_kinds = BTreeMap::new();
    for kind in CommandKind::ALL {
        let n = db.commands.count(&Filter::new().eq("kind", kind.as_str())).await?;
        command_kinds.insert(kind.as_str().to_string(), n);
    }

    Ok(DashboardStats {
        projects: ProjectStats {
            total: db.projects.count(&Filter::new()).await?,
            featured: db.projects.count(&Filter::new().eq("featured", true)).await?,
            by_type: project_types,
        },
        contacts: ContactStats {
            total: db.contacts.count(&Filter::new()).await?,
            new: status_count(ContactStatus::New),
            read: status_count(ContactStatus::Read),
            replied: status_count(ContactStatus::Replied),
            spam: status_count(ContactStatus::Spam),
        },
        terminal_commands: CommandStats {
            total: db.commands.count(&Filter::new()).await?,
            by_type: command_kinds,
        },
    })
}

/// `GET /api/admin/stats`
pub async fn get_stats(_admin: RequireAdmin, State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let stats = collect_stats(&state).await?;
    Ok(Json(json!({ "status": "success", "data": { "stats": stats } })))
}

/// `POST /api/admin/seed`: upsert the default terminal commands.
pub async fn seed(_admin: RequireAdmin, State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let seeded = state.catalog.seed(default_commands()).await?;
    info!(seeded, "Seeded terminal commands");
    Ok(Json(json!({
        "status": "success",
        "message": "Database seeded with initial data",
    })))
}
