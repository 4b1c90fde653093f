// ABOUTME: Integration tests for the authorization-code exchange
// ABOUTME: Exercises the flow runner against a mock token endpoint

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hearth_auth::error::AuthError;
use hearth_auth::oauth::{client_secret::ClientSecret, flow::FlowRunner};

fn secret_for(mock_server: &MockServer) -> ClientSecret {
    ClientSecret {
        client_id: "hearth-client".to_string(),
        client_secret: "hearth-secret".to_string(),
        auth_uri: "https://accounts.example.com/o/oauth2/auth".to_string(),
        token_uri: format!("{}/token", mock_server.uri()),
        redirect_uris: vec![],
    }
}

#[tokio::test]
async fn test_exchange_code_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-123"))
        .and(body_string_contains("client_id=hearth-client"))
        .and(body_string_contains("code_verifier=verifier-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.access",
            "refresh_token": "1//refresh",
            "expires_in": 3599,
            "token_type": "Bearer",
            "scope": "https://www.googleapis.com/auth/assistant-sdk-prototype"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let runner = FlowRunner::new(secret_for(&mock_server));
    let record = runner
        .exchange_code(
            "auth-code-123",
            "http://localhost:7337/oauth/callback",
            "verifier-abc",
        )
        .await
        .unwrap();

    assert_eq!(record.token, "ya29.access");
    assert_eq!(record.refresh_token.as_deref(), Some("1//refresh"));
    assert_eq!(record.client_id, "hearth-client");
    assert_eq!(record.client_secret, "hearth-secret");
    assert_eq!(record.token_uri, format!("{}/token", mock_server.uri()));
    assert_eq!(
        record.scopes,
        vec!["https://www.googleapis.com/auth/assistant-sdk-prototype"]
    );
}

#[tokio::test]
async fn test_exchange_code_trims_pasted_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=pasted-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let runner = FlowRunner::new(secret_for(&mock_server));

    // Terminal paste usually carries surrounding whitespace
    let record = runner
        .exchange_code("  pasted-code \n", "urn:ietf:wg:oauth:2.0:oob", "verifier")
        .await
        .unwrap();

    assert_eq!(record.token, "tok");
    assert!(record.refresh_token.is_none());
}

#[tokio::test]
async fn test_exchange_code_rejected_by_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&mock_server)
        .await;

    let runner = FlowRunner::new(secret_for(&mock_server));
    let err = runner
        .exchange_code("expired-code", "urn:ietf:wg:oauth:2.0:oob", "verifier")
        .await
        .unwrap_err();

    match err {
        AuthError::TokenExchange(msg) => assert!(msg.contains("400")),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_exchange_code_unparseable_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let runner = FlowRunner::new(secret_for(&mock_server));
    let err = runner
        .exchange_code("code", "urn:ietf:wg:oauth:2.0:oob", "verifier")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::TokenExchange(_)));
}
