//! HTTP server: shared state, routing and start-up.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::OriginalUri,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use folio_commands::{CommandCatalog, Terminal, TerminalSettings, SKILLS_TEXT};
use folio_config::FolioConfig;
use folio_core::ContactNotifier;
use folio_query::ListingProfile;
use folio_store::Database;

use crate::notifier::LogNotifier;
use crate::rate_limit::{limit_requests, RateLimiter};
use crate::{admin_api, contacts_api, health_api, projects_api, terminal_api};

/// Application state shared across routes.
pub struct AppState {
    pub db: Database,
    pub terminal: Terminal,
    pub catalog: CommandCatalog,
    pub notifier: Arc<dyn ContactNotifier>,
    pub admin_token: Option<String>,
    pub projects_listing: ListingProfile,
    pub contacts_listing: ListingProfile,
    pub rate_limiter: RateLimiter,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Database, config: &FolioConfig) -> Self {
        let settings = terminal_settings(config);
        let (max_requests, window_secs) = config.rate_limit();
        Self {
            terminal: Terminal::with_defaults(db.commands.clone(), db.projects.clone(), &settings),
            catalog: CommandCatalog::new(db.commands.clone()),
            notifier: Arc::new(LogNotifier),
            admin_token: config.admin_token().map(str::to_string),
            projects_listing: config.projects_listing(),
            contacts_listing: config.contacts_listing(),
            rate_limiter: RateLimiter::new(max_requests, window_secs)
                .trusting_forwarded_for(config.trust_forwarded_for()),
            started_at: Instant::now(),
            db,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ContactNotifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Terminal tunables from the `terminal` config section.
pub fn terminal_settings(config: &FolioConfig) -> TerminalSettings {
    let terminal = config.terminal.as_ref();
    let defaults = TerminalSettings::default();
    TerminalSettings {
        help_column_width: terminal
            .and_then(|t| t.help_column_width)
            .unwrap_or(defaults.help_column_width),
        skills_text: terminal
            .and_then(|t| t.skills_text.clone())
            .unwrap_or_else(|| SKILLS_TEXT.to_string()),
    }
}

/// Build the full router. Everything under `/api` is rate limited.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health_api::get_health))
        .route("/terminal", post(terminal_api::run_command))
        .route(
            "/terminal/commands",
            get(terminal_api::list_commands).post(terminal_api::create_command),
        )
        .route(
            "/terminal/commands/:id",
            get(terminal_api::get_command)
                .patch(terminal_api::update_command)
                .delete(terminal_api::delete_command),
        )
        .route(
            "/projects",
            get(projects_api::list_projects).post(projects_api::create_project),
        )
        .route(
            "/projects/:id",
            get(projects_api::get_project)
                .patch(projects_api::update_project)
                .delete(projects_api::delete_project),
        )
        .route(
            "/contacts",
            get(contacts_api::list_contacts).post(contacts_api::submit_contact),
        )
        .route(
            "/contacts/:id",
            get(contacts_api::get_contact)
                .patch(contacts_api::update_contact)
                .delete(contacts_api::delete_contact),
        )
        .route("/admin/stats", get(admin_api::get_stats))
        .route("/admin/seed", post(admin_api::seed))
        .layer(middleware::from_fn_with_state(state.clone(), limit_requests));

    Router::new()
        .route("/", get(health_api::welcome))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!("The requested resource '{uri}' does not exist"),
        })),
    )
}

/// Bind and serve until the process is stopped.
#[instrument(skip(app))]
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Folio HTTP server listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request},
    };
    use folio_commands::default_commands;
    use folio_config::schema::AuthConfig;
    use folio_core::{DocumentStore, NewProject};
    use serde_json::Value;
    use tower::ServiceExt;

    const TOKEN: &str = "test-admin-token";

    async fn test_app() -> Router {
        let db = Database::new();
        for cmd in default_commands() {
            db.commands.insert(cmd.into_definition().unwrap()).await.unwrap();
        }
        for i in 0..12 {
            let project = NewProject {
                title: format!("Project {i}"),
                description: "A project".into(),
                short_description: "Short".into(),
                order: i,
                ..Default::default()
            };
            db.projects.insert(project.into_project().unwrap()).await.unwrap();
        }
        let config = FolioConfig {
            auth: Some(AuthConfig { admin_token: Some(TOKEN.into()) }),
            ..Default::default()
        };
        build_router(Arc::new(AppState::new(db, &config)))
    }

    async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(b) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    #[tokio::test]
    async fn terminal_runs_commands() {
        let app = test_app().await;
        let (status, body) =
            send(app.clone(), Method::POST, "/api/terminal", None, Some(json!({"command": "PWD"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["output"], "/home/rey");

        let (_, body) = send(app, Method::POST, "/api/terminal", None, Some(json!({"command": "nope"}))).await;
        assert_eq!(
            body["data"]["output"],
            "Command not found: nope. Type 'help' to see available commands."
        );
    }

    #[tokio::test]
    async fn terminal_rejects_blank_input() {
        let app = test_app().await;
        let (status, body) = send(app.clone(), Method::POST, "/api/terminal", None, Some(json!({"command": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Command is required");

        let (status, _) = send(app, Method::POST, "/api/terminal", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_routes_need_the_token() {
        let app = test_app().await;
        let (status, body) = send(app.clone(), Method::GET, "/api/terminal/commands", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "You are not logged in. Please log in to get access.");

        let (status, _) = send(app.clone(), Method::GET, "/api/terminal/commands", Some("wrong"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(app, Method::GET, "/api/terminal/commands", Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], default_commands().len());
    }

    #[tokio::test]
    async fn duplicate_command_is_rejected() {
        let app = test_app().await;
        let body = json!({"name": "Hello", "kind": "static", "responseText": "again"});
        let (status, body) = send(app, Method::POST, "/api/terminal/commands", Some(TOKEN), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Command already exists");
    }

    #[tokio::test]
    async fn created_command_is_usable_from_the_terminal() {
        let app = test_app().await;
        let body = json!({"name": "motd", "kind": "static", "responseText": "Have a nice day"});
        let (status, _) = send(app.clone(), Method::POST, "/api/terminal/commands", Some(TOKEN), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(app, Method::POST, "/api/terminal", None, Some(json!({"command": "motd"}))).await;
        assert_eq!(body["data"]["output"], "Have a nice day");
    }

    #[tokio::test]
    async fn projects_listing_is_paged() {
        let app = test_app().await;
        let (status, body) = send(app, Method::GET, "/api/projects?limit=5&page=3", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"], 2);
        assert_eq!(body["total"], 12);
        assert_eq!(body["page"], 3);
        assert_eq!(body["pages"], 3);
        assert_eq!(body["data"]["projects"][0]["title"], "Project 10");
    }

    #[tokio::test]
    async fn project_lookup_by_slug_and_bad_id() {
        let app = test_app().await;
        let (status, body) = send(app.clone(), Method::GET, "/api/projects/project-3", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["project"]["title"], "Project 3");

        let (status, body) = send(app, Method::DELETE, "/api/projects/not-a-uuid", Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No project found with that ID");
    }

    #[tokio::test]
    async fn contact_update_only_touches_status_and_replied() {
        let app = test_app().await;
        let form = json!({
            "name": "Ada",
            "email": "Ada@Example.com",
            "subject": "Hi",
            "message": "Hello there"
        });
        let (status, body) = send(app.clone(), Method::POST, "/api/contacts", None, Some(form)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let patch = json!({"status": "read", "email": "evil@example.com", "replied": true});
        let (status, body) =
            send(app, Method::PATCH, &format!("/api/contacts/{id}"), Some(TOKEN), Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        let contact = &body["data"]["contact"];
        assert_eq!(contact["status"], "read");
        assert_eq!(contact["replied"], true);
        assert_eq!(contact["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_contact_is_a_validation_failure() {
        let app = test_app().await;
        let form = json!({"name": "Ada", "email": "not-an-email", "subject": "Hi", "message": "Hello"});
        let (status, body) = send(app, Method::POST, "/api/contacts", None, Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn stats_count_collections() {
        let app = test_app().await;
        let (status, body) = send(app, Method::GET, "/api/admin/stats", Some(TOKEN), None).await;
        assert_eq!(status, StatusCode::OK);
        let stats = &body["data"]["stats"];
        assert_eq!(stats["projects"]["total"], 12);
        assert_eq!(stats["projects"]["byType"]["AI"], 12);
        assert_eq!(stats["contacts"]["total"], 0);
        assert_eq!(stats["terminalCommands"]["total"], default_commands().len());
    }

    #[tokio::test]
    async fn unknown_routes_fall_back_to_404() {
        let app = test_app().await;
        let (status, body) = send(app, Method::GET, "/api/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "The requested resource '/api/nowhere' does not exist");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app().await;
        let (status, body) = send(app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "folio");
    }

    fn from_peer(uri: &str, forwarded_for: &str, body: Option<Value>) -> Request<Body> {
        let peer: SocketAddr = "203.0.113.9:4000".parse().unwrap();
        let builder = Request::builder()
            .uri(uri)
            .header("x-forwarded-for", forwarded_for);
        let mut req = match body {
            Some(b) => builder
                .method(Method::POST)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        req.extensions_mut().insert(axum::extract::ConnectInfo(peer));
        req
    }

    #[tokio::test]
    async fn rate_limit_keys_on_peer_not_forwarded_header() {
        let config = FolioConfig {
            rate_limit: Some(folio_config::schema::RateLimitConfig {
                max_requests: Some(2),
                window_secs: Some(60),
                trust_forwarded_for: None,
            }),
            ..Default::default()
        };
        let app = build_router(Arc::new(AppState::new(Database::new(), &config)));

        let mut statuses = Vec::new();
        for i in 0..4 {
            let req = from_peer("/api/health", &format!("198.51.100.{i}"), None);
            statuses.push(app.clone().oneshot(req).await.unwrap().status());
        }
        assert_eq!(
            statuses,
            vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS, StatusCode::TOO_MANY_REQUESTS]
        );
    }

    #[tokio::test]
    async fn contact_records_peer_address() {
        let app = test_app().await;
        let form = json!({"name": "Ada", "email": "ada@example.com", "subject": "Hi", "message": "Hello"});
        let res = app.clone().oneshot(from_peer("/api/contacts", "10.9.9.9", Some(form))).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (_, body) = send(app, Method::GET, &format!("/api/contacts/{id}"), Some(TOKEN), None).await;
        assert_eq!(body["data"]["contact"]["ipAddress"], "203.0.113.9");
    }
}
