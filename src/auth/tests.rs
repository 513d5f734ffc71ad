//! Tests for the auth module

use super::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn password_config(server: &MockServer) -> AuthConfig {
    AuthConfig::Password {
        token_url: format!("{}/token", server.uri()),
        client_id: "my-client".to_string(),
        client_secret: "my-secret".to_string(),
        username: "ruth".to_string(),
        password: "whither thou goest".to_string(),
    }
}

#[tokio::test]
async fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
    assert!(auth.access_token().await.is_err());
    assert_eq!(auth.user_id().await.unwrap(), None);
}

#[tokio::test]
async fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let req = auth.apply(req).await.unwrap();

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
    assert_eq!(auth.access_token().await.unwrap(), "my-bearer-token");
}

#[tokio::test]
async fn test_password_grant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=my-client"))
        .and(body_string_contains("client_secret=my-secret"))
        .and(body_string_contains("username=ruth"))
        .and(body_string_contains("password=whither+thou+goest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "oauth-token-123",
            "expires_in": 3600,
            "token_type": "Bearer",
            "user_id": 12345
        })))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");
    let req = auth.apply(req).await.unwrap();

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer oauth-token-123"
    );
    assert_eq!(auth.user_id().await.unwrap(), Some(12345));
}

#[tokio::test]
async fn test_user_id_as_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "user_id": "987"
        })))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));
    assert_eq!(auth.user_id().await.unwrap(), Some(987));
}

#[tokio::test]
async fn test_token_caching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "cached-token",
            "expires_in": 3600
        })))
        .expect(1) // Expect exactly 1 call
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    for _ in 0..3 {
        assert_eq!(auth.access_token().await.unwrap(), "cached-token");
    }
}

#[tokio::test]
async fn test_concurrent_refresh_fetches_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "shared-token",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    let tokens = futures::future::join_all((0..5).map(|_| auth.access_token())).await;
    for token in tokens {
        assert_eq!(token.unwrap(), "shared-token");
    }
}

#[tokio::test]
async fn test_expired_token_is_refetched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "short-lived",
            "expires_in": 5
        })))
        .expect(2) // Inside the expiry buffer, so every call refetches
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    auth.access_token().await.unwrap();
    auth.access_token().await.unwrap();
}

#[tokio::test]
async fn test_clear_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "token",
            "expires_in": 3600
        })))
        .expect(2) // Expect 2 calls due to cache clear
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    auth.access_token().await.unwrap();
    auth.clear_cache().await;
    auth.access_token().await.unwrap();
}

#[tokio::test]
async fn test_token_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_grant"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));

    let err = auth.access_token().await.unwrap_err();
    assert!(matches!(err, crate::error::Error::OAuth2 { .. }));
    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_token_fetch_is_logged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "token",
            "user_id": 1
        })))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(password_config(&mock_server));
    auth.access_token().await.unwrap();

    assert!(logs_contain("Obtained access token"));
}
