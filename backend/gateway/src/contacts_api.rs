//! Contact form submission (public) and inbox management (admin).

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Path, Query, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use folio_core::{Contact, ContactForm, ContactUpdate, DocumentStore, FolioError};
use folio_logging::{AuditEvent, AuditLogger};

use crate::auth::RequireAdmin;
use crate::error::{parse_id, ApiResult};
use crate::listing::list_page;
use crate::server::AppState;

const NOT_FOUND: &str = "No contact found with that ID";

fn contact_body(contact: &Contact) -> Json<Value> {
    Json(json!({ "status": "success", "data": { "contact": contact } }))
}

fn audit(action: &str, id: Uuid) {
    AuditLogger::log_event(AuditEvent::AdminMutation {
        collection: "contacts".into(),
        action: action.into(),
        id: id.to_string(),
    });
}

/// `POST /api/contacts`
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(form) = body?;
    let ip = state.rate_limiter.client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let contact = state.db.contacts.insert(form.into_contact(ip, user_agent)?).await?;

    // A failed notification does not lose the stored submission.
    if let Err(e) = state.notifier.notify(&contact).await {
        warn!(id = %contact.meta.id, error = %e, "Contact notification failed");
    }
    AuditLogger::log_event(AuditEvent::ContactSubmitted {
        id: contact.meta.id.to_string(),
        email: contact.email.clone(),
        subject: contact.subject.clone(),
    });

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Contact form submitted successfully",
            "data": { "id": contact.meta.id },
        })),
    ))
}

/// `GET /api/contacts`
pub async fn list_contacts(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(params): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let body = list_page::<Contact>(&*state.db.contacts, &params, &state.contacts_listing, "contacts").await?;
    Ok(Json(body))
}

/// `GET /api/contacts/:id`
pub async fn get_contact(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id, NOT_FOUND)?;
    let contact = state.db.contacts.get(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
    Ok(contact_body(&contact))
}

/// `PATCH /api/contacts/:id`. Only `status` and `replied` are applied.
pub async fn update_contact(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ContactUpdate>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(update) = body?;
    let id = parse_id(&id, NOT_FOUND)?;
    let mut contact = state.db.contacts.get(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
    update.apply(&mut contact);
    let contact = state.db.contacts.replace(contact).await?;
    audit("update", id);
    Ok(contact_body(&contact))
}

/// `DELETE /api/contacts/:id`
pub async fn delete_contact(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    state.db.contacts.delete(id).await?.ok_or_else(|| FolioError::not_found(NOT_FOUND))?;
    audit("delete", id);
    Ok(StatusCode::NO_CONTENT)
}
