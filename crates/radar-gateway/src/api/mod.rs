mod proxy;

use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use radar_core::AppConfig;
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{request_id, require_authorization};

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    /// Upstream API root, always ending in `/`.
    pub upstream_base: Url,
}

impl AppState {
    /// Builds the upstream HTTP client from gateway configuration.
    pub fn from_app_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Self::new(http, &config.upstream_base_url)
    }

    pub fn new(http: reqwest::Client, upstream_base: &str) -> anyhow::Result<Self> {
        let upstream_base = Url::parse(&format!("{}/", upstream_base.trim_end_matches('/')))?;
        Ok(Self {
            http,
            upstream_base,
        })
    }
}

/// Failures the gateway reports itself, as opposed to relayed upstream
/// errors.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("API key required")]
    MissingAuthorization,

    /// Transport failure or an upstream body that was not JSON.
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "API key required",
                    details: None,
                }),
            )
                .into_response(),
            ProxyError::Upstream(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to fetch from upstream API",
                    details: Some(details),
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Permissive CORS. Preflight `OPTIONS` requests are answered here and never
/// reach the authorization check or the upstream.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

pub fn build_app(state: AppState) -> Router {
    let proxy_routes = Router::new()
        .route("/api/{*path}", any(proxy::forward))
        .layer(axum::middleware::from_fn(require_authorization));

    Router::new()
        .route("/health", get(health))
        .merge(proxy_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}
