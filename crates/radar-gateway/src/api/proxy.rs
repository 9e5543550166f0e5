use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderMap, Method,
    },
    response::{IntoResponse, Response},
    Extension, Json,
};
use reqwest::Url;

use super::{AppState, ProxyError};
use crate::middleware::RequestId;

/// Query parameter consumed by the gateway's own routing.
const ROUTING_PARAM: &str = "path";

/// Relays one request to the upstream API under `path`.
///
/// Query parameters are forwarded in order, minus the routing parameter and
/// any empty values. The `Authorization` header, required by the
/// `require_authorization` layer, is passed through verbatim.
pub(super) async fn forward(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    method: Method,
    Path(path): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream_url(&state.upstream_base, &path, &params)?;
    tracing::info!(request_id = %req_id.0, %method, path = %url.path(), "proxying request");

    let mut request = state
        .http
        .request(method.clone(), url)
        .header(ACCEPT, "application/json")
        .header(CONTENT_TYPE, "application/json");
    if let Some(authorization) = headers.get(AUTHORIZATION) {
        request = request.header(AUTHORIZATION, authorization.clone());
    }
    if method != Method::GET && !body.is_empty() {
        request = request.body(body);
    }

    let response = request.send().await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "upstream request failed");
        ProxyError::Upstream(e.to_string())
    })?;

    let status = response.status();
    let data: serde_json::Value = response.json().await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, %status, error = %e, "upstream body was not JSON");
        ProxyError::Upstream(e.to_string())
    })?;

    if status.is_success() {
        tracing::debug!(request_id = %req_id.0, %status, "upstream success");
    } else {
        tracing::warn!(request_id = %req_id.0, %status, "upstream returned error status");
    }

    Ok((status, Json(data)).into_response())
}

/// Joins `path` under `base` and appends the forwardable query parameters.
fn upstream_url(base: &Url, path: &str, params: &[(String, String)]) -> Result<Url, ProxyError> {
    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| ProxyError::Upstream(format!("invalid upstream path '{path}': {e}")))?;

    let forwarded: Vec<&(String, String)> = params
        .iter()
        .filter(|(key, value)| key != ROUTING_PARAM && !value.is_empty())
        .collect();
    if !forwarded.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in forwarded {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.ahrefs.com/v3/").expect("valid url")
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn appends_path_under_versioned_base() {
        let url = upstream_url(&base(), "brand-radar/sov-overview", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.ahrefs.com/v3/brand-radar/sov-overview");
    }

    #[test]
    fn drops_routing_param_and_empty_values() {
        let url = upstream_url(
            &base(),
            "site-explorer/metrics",
            &pairs(&[
                ("path", "site-explorer/metrics"),
                ("target", "ahrefs.com"),
                ("country", ""),
                ("mode", "subdomains"),
            ]),
        )
        .unwrap();
        assert_eq!(
            url.query(),
            Some("target=ahrefs.com&mode=subdomains")
        );
    }
}
