use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::ProxyError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Axum middleware that extracts or generates a request ID.
///
/// An incoming `x-request-id` header is reused; otherwise a new `UUIDv4` is
/// generated. The ID is inserted into request extensions as [`RequestId`] and
/// echoed on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Rejects proxied requests that carry no `Authorization` header.
///
/// The header's value is not inspected; the upstream decides whether it is
/// valid.
pub async fn require_authorization(req: Request, next: Next) -> Response {
    if req.headers().contains_key(AUTHORIZATION) {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "rejecting request without authorization");
        ProxyError::MissingAuthorization.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/ping", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(require_authorization))
            .layer(axum::middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn request_id_is_echoed_when_supplied() {
        let response = app()
            .oneshot(
                http::Request::builder()
                    .uri("/ping")
                    .header("authorization", "Bearer k")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let response = app()
            .oneshot(
                http::Request::builder()
                    .uri("/ping")
                    .header("authorization", "Bearer k")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let id = response.headers()["x-request-id"].to_str().expect("ascii");
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn missing_authorization_is_401() {
        let response = app()
            .oneshot(
                http::Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
