//! Admin Authorization
//!
//! Bearer token compared against the configured admin token. Token issuance
//! happens outside this service.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use folio_core::FolioError;
use tracing::warn;

use crate::error::ApiError;
use crate::server::AppState;

/// Extractor that only succeeds for requests carrying the admin token.
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|val| val.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(token) = token else {
            warn!(path = %parts.uri.path(), "Missing or invalid Authorization header");
            return Err(ApiError(FolioError::Unauthorized(
                "You are not logged in. Please log in to get access.".into(),
            )));
        };

        match state.admin_token.as_deref() {
            Some(expected) if expected == token => Ok(RequireAdmin),
            _ => {
                warn!(path = %parts.uri.path(), "Rejected admin token");
                Err(ApiError(FolioError::Forbidden(
                    "You do not have permission to perform this action".into(),
                )))
            }
        }
    }
}
