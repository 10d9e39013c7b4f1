use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use chrono::Utc;
use jwt_gate::api::routes::create_router;
use jwt_gate::auth::{DecodedToken, TokenConfig, auth_middleware, encode, encode_at};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Map, Value, json};
use std::sync::Arc;

const SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

fn test_config() -> TokenConfig {
    TokenConfig::new(SECRET)
}

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn mint(value: Value) -> String {
    encode(&payload(value), &test_config())
        .expect("should encode")
        .token
}

/// Create a test server around the demo router
fn create_test_server() -> TestServer {
    let app = create_router(Arc::new(test_config()));
    TestServer::new(app).expect("Failed to create test server")
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check_is_public() {
    let server = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

// ============= Authorized Requests =============

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let server = create_test_server();
    let token = mint(json!({"sub": "user-1", "roles": ["admin"]}));

    let response = server
        .get("/api/me")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["sub"], "user-1");
    assert_eq!(body["roles"], json!(["admin"]));
    assert!(body["iat"].is_i64());
    assert!(body["exp"].is_i64());
    assert_eq!(body["jti"].as_str().map(str::len), Some(64));
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_is_accepted() {
    let server = create_test_server();
    let token = mint(json!({"sub": "user-1"}));

    let response = server
        .get("/api/me")
        .add_header("Authorization", format!("bearer {}", token))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_cookie_token_is_accepted() {
    let server = create_test_server();
    let token = mint(json!({"sub": "cookie-user"}));

    let response = server
        .get("/api/me")
        .add_header("Cookie", format!("session=abc; jwt={}", token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["sub"], "cookie-user");
}

#[tokio::test]
async fn test_session_endpoint_reports_token_timing() {
    let server = create_test_server();
    let minted = encode(&payload(json!({"sub": "user-1"})), &test_config()).expect("should encode");

    let response = server
        .get("/api/session")
        .add_header("Authorization", format!("Bearer {}", minted.token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["jti"], minted.jti.as_str());
    assert_eq!(body["expires_at"], minted.expires_at);
    assert_eq!(body["expires_at"].as_i64(), body["issued_at"].as_i64().map(|iat| iat + 3600));
    let expires_in = body["expires_in"].as_i64().expect("expires_in");
    assert!(expires_in > 3500 && expires_in <= 3600);
}

// ============= Rejected Requests =============

async fn assert_rejected(server: &TestServer, authorization: Option<String>, cookie: Option<String>) {
    let mut request = server.get("/api/me");
    if let Some(value) = authorization {
        request = request.add_header("Authorization", value);
    }
    if let Some(value) = cookie {
        request = request.add_header("Cookie", value);
    }

    let response = request.await;
    response.assert_status_unauthorized();
    assert!(response.text().is_empty(), "rejections must not leak details");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = create_test_server();
    assert_rejected(&server, None, None).await;
}

#[tokio::test]
async fn test_empty_cookie_is_rejected() {
    let server = create_test_server();
    assert_rejected(&server, None, Some("jwt=".to_string())).await;
}

#[tokio::test]
async fn test_header_without_scheme_is_rejected() {
    let server = create_test_server();
    let token = mint(json!({"sub": "user-1"}));

    // A bare token with no space must be refused, not crash the handler.
    assert_rejected(&server, Some(token), None).await;
}

#[tokio::test]
async fn test_wrong_scheme_is_rejected() {
    let server = create_test_server();
    let token = mint(json!({"sub": "user-1"}));
    assert_rejected(&server, Some(format!("Token {}", token)), None).await;
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let server = create_test_server();
    assert_rejected(&server, Some("Bearer invalid".to_string()), None).await;
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let server = create_test_server();
    let token = encode(&Map::new(), &TokenConfig::new("some-other-secret"))
        .expect("should encode")
        .token;

    assert_rejected(&server, Some(format!("Bearer {}", token)), None).await;
}

#[tokio::test]
async fn test_expired_token_with_valid_signature_is_rejected() {
    let server = create_test_server();
    let config = test_config().with_expiry_minutes(1);
    let issued_at = Utc::now().timestamp() - 120;
    let expired = encode_at(&Map::new(), &config, issued_at).expect("should encode");

    // The codec itself still accepts it.
    assert!(config.decode(&expired.token).is_ok());

    assert_rejected(&server, Some(format!("Bearer {}", expired.token)), None).await;
    assert_rejected(&server, None, Some(format!("jwt={}", expired.token))).await;
}

#[tokio::test]
async fn test_token_without_exp_is_rejected() {
    let server = create_test_server();
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({"sub": "user-1", "iat": Utc::now().timestamp()}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("should sign");

    assert_rejected(&server, Some(format!("Bearer {}", token)), None).await;
}

#[tokio::test]
async fn test_token_with_string_exp_is_rejected() {
    let server = create_test_server();
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({"sub": "user-1", "exp": "4102444800"}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("should sign");

    assert_rejected(&server, Some(format!("Bearer {}", token)), None).await;
}

#[tokio::test]
async fn test_bad_header_does_not_fall_back_to_cookie() {
    let server = create_test_server();
    let token = mint(json!({"sub": "user-1"}));

    assert_rejected(
        &server,
        Some("Basic dXNlcjpwYXNz".to_string()),
        Some(format!("jwt={}", token)),
    )
    .await;
}

// ============= Custom Router =============

#[tokio::test]
async fn test_middleware_on_custom_router() {
    let config = Arc::new(test_config());

    async fn whoami(DecodedToken(claims): DecodedToken) -> String {
        claims
            .get("sub")
            .and_then(Value::as_str)
            .unwrap_or("anonymous")
            .to_string()
    }

    let app = Router::new()
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .route("/open", get(|| async { "open" }));
    let server = TestServer::new(app).expect("Failed to create test server");

    server.get("/open").await.assert_text("open");
    server.get("/whoami").await.assert_status_unauthorized();

    let token = mint(json!({"sub": "user-42"}));
    let response = server
        .get("/whoami")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    response.assert_status_ok();
    response.assert_text("user-42");
}

#[tokio::test]
async fn test_decoded_token_extractor_without_middleware_is_401() {
    async fn needs_token(DecodedToken(_claims): DecodedToken) -> &'static str {
        "unreachable"
    }

    let app = Router::new().route("/guarded", get(needs_token));
    let server = TestServer::new(app).expect("Failed to create test server");

    let token = mint(json!({"sub": "user-1"}));
    server
        .get("/guarded")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status_unauthorized();
}
