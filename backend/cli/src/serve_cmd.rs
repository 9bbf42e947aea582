//! `folio serve`

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use folio_config::{load_and_prepare, FolioConfig};
use folio_gateway::{build_router, start_server, AppState};
use folio_logging::init_logger;

use crate::bootstrap::open_database;

pub async fn run(config_path: &Path, port: Option<u16>) -> Result<()> {
    let mut config = load_and_prepare(config_path).await?;
    init_logger(config.log_dir(), config.log_level(), config.log_json());

    if let Some(port) = port {
        config.server.get_or_insert_with(Default::default).port = Some(port);
    }
    let addr = listen_addr(&config)?;

    info!(
        config = %config_path.display(),
        %addr,
        admin = config.admin_token().is_some(),
        "Starting Folio"
    );

    let db = open_database(&config).await?;
    let state = Arc::new(AppState::new(db, &config));
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    start_server(addr, app).await
}

fn listen_addr(config: &FolioConfig) -> Result<SocketAddr> {
    let raw = format!("{}:{}", config.bind(), config.port());
    raw.parse()
        .with_context(|| format!("Invalid listen address: {raw}"))
}

/// CORS for the configured origins, with credentials and the admin
/// `Authorization` header. Any origin is allowed when none are configured.
fn cors_layer(config: &FolioConfig) -> Result<CorsLayer> {
    let origins = config.cors_origins();
    if origins.is_empty() {
        warn!("No server.corsOrigins configured; allowing any origin");
        return Ok(CorsLayer::permissive());
    }

    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o.trim())
                .with_context(|| format!("Invalid CORS origin: {o}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use folio_config::schema::ServerConfig;
    use tower::ServiceExt;

    fn config_with(origins: &[&str]) -> FolioConfig {
        FolioConfig {
            server: Some(ServerConfig {
                cors_origins: Some(origins.iter().map(|o| o.to_string()).collect()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<HeaderValue> {
        let app = Router::new().route("/api/health", get(|| async { "ok" })).layer(layer);
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/health")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    #[tokio::test]
    async fn configured_origins_are_the_only_ones_allowed() {
        let layer = cors_layer(&config_with(&["https://folio.example"])).unwrap();
        assert_eq!(
            preflight(layer.clone(), "https://folio.example").await.unwrap(),
            "https://folio.example"
        );
        assert!(preflight(layer, "https://evil.example").await.is_none());
    }

    #[tokio::test]
    async fn unconfigured_origins_fall_back_to_permissive() {
        let layer = cors_layer(&FolioConfig::default()).unwrap();
        assert!(preflight(layer, "https://anywhere.example").await.is_some());
    }

    #[test]
    fn invalid_origin_is_an_error() {
        assert!(cors_layer(&config_with(&["https://bad\norigin"])).is_err());
    }
}
