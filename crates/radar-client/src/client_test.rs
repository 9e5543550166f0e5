use super::*;

fn test_client(base_url: &str) -> MetricsClient {
    MetricsClient::new("test-token", base_url).expect("client construction should not fail")
}

#[test]
fn build_url_joins_under_gateway_prefix() {
    let client = test_client("http://localhost:3001/api");
    let url = client
        .build_url("/brand-radar/mentions-overview", &[("data_source", "chatgpt")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:3001/api/brand-radar/mentions-overview?data_source=chatgpt"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("http://localhost:3001/api/");
    let url = client.build_url("site-explorer/metrics", &[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3001/api/site-explorer/metrics");
}

#[test]
fn build_url_omits_empty_params_and_lowercases_country() {
    let client = test_client("http://localhost:3001/api");
    let url = client
        .build_url(
            "brand-radar/sov-overview",
            &[("brand", "Ahrefs"), ("competitors", ""), ("country", "GB")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:3001/api/brand-radar/sov-overview?brand=Ahrefs&country=gb"
    );
}

#[test]
fn build_url_encodes_brand_lists() {
    let client = test_client("http://localhost:3001/api");
    let url = client
        .build_url("brand-radar/sov-overview", &[("competitors", "Moz,Search Engine Land")])
        .unwrap();
    assert!(
        url.as_str().contains("competitors=Moz%2CSearch+Engine+Land"),
        "brand list should be form-encoded: {url}"
    );
}

#[test]
fn new_rejects_unparseable_base_url() {
    let err = MetricsClient::new("test-token", "not a url").unwrap_err();
    assert!(matches!(err, MetricsError::InvalidBaseUrl { .. }));
}

#[test]
fn blank_token_means_no_credential() {
    let client = MetricsClient::new("   ", "http://localhost:3001/api").unwrap();
    assert!(!client.has_credential());
    assert!(matches!(
        client.ensure_credential(),
        Err(MetricsError::MissingCredential)
    ));
}

#[test]
fn debug_output_redacts_token() {
    let client = test_client("http://localhost:3001/api");
    let debug = format!("{client:?}");
    assert!(!debug.contains("test-token"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn upstream_error_prefers_json_error_message() {
    let err = upstream_error(StatusCode::FORBIDDEN, r#"{"error": "Insufficient plan"}"#);
    assert!(matches!(
        err,
        MetricsError::Upstream { status: 403, ref message } if message == "Insufficient plan"
    ));
}

#[test]
fn upstream_error_uses_generic_message_for_json_without_error() {
    let err = upstream_error(StatusCode::BAD_REQUEST, r#"{"detail": "nope"}"#);
    assert!(matches!(
        err,
        MetricsError::Upstream { status: 400, ref message } if message == "API Error: 400"
    ));
}

#[test]
fn upstream_error_falls_back_to_reason_phrase() {
    let err = upstream_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
    assert!(matches!(
        err,
        MetricsError::Upstream { status: 502, ref message } if message == "Bad Gateway"
    ));
}
