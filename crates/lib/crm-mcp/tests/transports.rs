mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use common::{StubApi, server};
use crm_mcp::server::{router, serve_lines};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn post_returns_rpc_envelopes_with_http_ok() {
    let (server, _) = server(StubApi::default());

    let response = router(server)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/mcp")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["serverInfo"]["name"], json!("crm-mcp"));
}

#[tokio::test]
async fn rpc_errors_still_answer_http_ok() {
    let (server, _) = server(StubApi::default());

    let response = router(server)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/mcp")
                .body(Body::from("not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], json!(-32700));
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let (server, _) = server(StubApi::default());

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = router(server.clone())
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri("/mcp")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}

#[tokio::test]
async fn preflight_is_accepted_with_cors_headers() {
    let (server, _) = server(StubApi::default());

    let response = router(server)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/mcp")
                .header(header::ORIGIN, "https://client.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn bare_options_is_ok() {
    let (server, _) = server(StubApi::default());

    let response = router(server)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/mcp")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_answers_ok() {
    let (server, _) = server(StubApi::default());

    let response = router(server)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn stdio_answers_requests_and_skips_notifications() {
    let (server, _) = server(StubApi::default());
    let input = concat!(
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        "\n",
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );
    let mut output = Vec::new();

    serve_lines(&server, input.as_bytes(), &mut output)
        .await
        .expect("serve");

    let text = String::from_utf8(output).expect("utf8");
    let responses: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("response line"))
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], json!(1));
    assert!(responses[0]["result"]["tools"].is_array());
    assert_eq!(responses[1]["id"], json!(2));
    assert_eq!(responses[1]["error"]["code"], json!(-32601));
}
