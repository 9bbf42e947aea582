//! Gateway Rate Limiting
//!
//! Fixed window per client address, applied to everything under `/api`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use folio_core::FolioError;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::server::AppState;

#[derive(Clone)]
pub struct RateLimiter {
    // client -> (request_count, window_start)
    limits: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
    pub max_requests: u32,
    pub window: Duration,
    /// Key on `X-Forwarded-For` rather than the socket peer.
    pub trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            limits: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
            trust_forwarded_for: false,
        }
    }

    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Client address for this request under the configured trust policy.
    pub fn client_ip(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
        client_ip(headers, peer, self.trust_forwarded_for)
    }

    /// Count a request from `client` and report whether it is allowed.
    pub async fn check_limit(&self, client: &str) -> bool {
        let mut limits = self.limits.write().await;
        let now = Instant::now();

        if !limits.contains_key(client) {
            // Only a new client can grow the map, so expired windows are dropped here.
            let window = self.window;
            limits.retain(|_, (_, start)| now.duration_since(*start) <= window);
        }

        let state = limits.entry(client.to_string()).or_insert((0, now));

        if now.duration_since(state.1) > self.window {
            state.0 = 1;
            state.1 = now;
            debug!(client, "Rate limit window reset");
            true
        } else {
            state.0 += 1;
            if state.0 > self.max_requests {
                warn!(client, "Rate limit exceeded");
                false
            } else {
                true
            }
        }
    }

    /// Flush all expired windows.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;
        self.limits
            .write()
            .await
            .retain(|_, (_, start)| now.duration_since(*start) <= window);
    }

    pub async fn tracked_clients(&self) -> usize {
        self.limits.read().await.len()
    }
}

/// Client address: the socket peer, or the first `X-Forwarded-For` entry
/// when `trust_forwarded_for` is set and the header is present.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded_for: bool) -> Option<String> {
    let forwarded = trust_forwarded_for
        .then(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .flatten();
    forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()))
}

pub async fn limit_requests(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let peer = req.extensions().get::<ConnectInfo<SocketAddr>>().map(|ci| ci.0);
    let client = state
        .rate_limiter
        .client_ip(req.headers(), peer)
        .unwrap_or_else(|| "unknown".to_string());

    if !state.rate_limiter.check_limit(&client).await {
        return ApiError(FolioError::RateLimited(
            "Too many requests from this IP, please try again later.".into(),
        ))
        .into_response();
    }
    next.run(req).await
}
