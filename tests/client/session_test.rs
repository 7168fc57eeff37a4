//! Session login and authenticated-post tests against a canned local server.

use mattersend::client::{ClientError, MattermostClient};

use crate::support::{refused_url, request_body, serve_once};

#[tokio::test]
async fn login_returns_token_header_value() {
    let (url, _request) = serve_once("200 OK", &[("Token", "abc123")], "{}").await;
    let client = MattermostClient::new(url);

    let token = match client.login("deckard", "hunter2").await {
        Ok(token) => token,
        Err(err) => panic!("login should succeed: {err}"),
    };
    assert_eq!(token, "abc123");
}

#[tokio::test]
async fn login_posts_credentials_to_login_endpoint() {
    let (url, request) = serve_once("200 OK", &[("Token", "abc123")], "{}").await;
    let client = MattermostClient::new(url);

    let login = client.login("deckard", "hunter2").await;
    assert!(login.is_ok());

    let request = match request.await {
        Ok(request) => request,
        Err(err) => panic!("request should be captured: {err}"),
    };
    assert!(request.starts_with("POST /api/v4/users/login"));
    assert_eq!(
        request_body(&request),
        serde_json::json!({"login_id": "deckard", "password": "hunter2"})
    );
}

#[tokio::test]
async fn login_rejects_non_200_status() {
    let (url, _request) = serve_once(
        "401 Unauthorized",
        &[],
        r#"{"message":"incorrect password"}"#,
    )
    .await;
    let client = MattermostClient::new(url);

    match client.login("deckard", "wrong").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("incorrect password"));
        }
        other => panic!("expected status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_without_token_header_fails() {
    let (url, _request) = serve_once("200 OK", &[], "{}").await;
    let client = MattermostClient::new(url);

    match client.login("deckard", "hunter2").await {
        Err(ClientError::MissingToken) => {}
        other => panic!("expected missing-token error, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_with_empty_token_header_fails() {
    let (url, _request) = serve_once("200 OK", &[("Token", "")], "{}").await;
    let client = MattermostClient::new(url);

    match client.login("deckard", "hunter2").await {
        Err(ClientError::MissingToken) => {}
        other => panic!("expected missing-token error, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_reports_transport_failure() {
    let client = MattermostClient::new(refused_url().await);

    match client.login("deckard", "hunter2").await {
        Err(ClientError::Transport(_)) => {}
        other => panic!("expected transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn send_message_accepts_201() {
    let (url, request) = serve_once("201 Created", &[], "{}").await;
    let client = MattermostClient::new(url);

    let sent = client
        .send_message("abc123", "town-square", "line1\nline2")
        .await;
    assert!(sent.is_ok());

    let request = match request.await {
        Ok(request) => request,
        Err(err) => panic!("request should be captured: {err}"),
    };
    assert!(request.starts_with("POST /api/v4/posts"));
    assert!(request.to_lowercase().contains("authorization: bearer abc123"));
    assert_eq!(
        request_body(&request),
        serde_json::json!({"channel_id": "town-square", "message": "line1\nline2"})
    );
}

#[tokio::test]
async fn send_message_rejects_403() {
    let (url, _request) = serve_once("403 Forbidden", &[], r#"{"message":"no access"}"#).await;
    let client = MattermostClient::new(url);

    match client.send_message("abc123", "town-square", "hello").await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, 403),
        other => panic!("expected status error, got: {other:?}"),
    }
}
