use crate::auth::DecodedToken;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Summary of the token that authorized the request.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub jti: Option<String>,
    pub issued_at: Option<i64>,
    pub expires_at: Option<i64>,
    /// Seconds left before the token expires.
    pub expires_in: Option<i64>,
}

/// Return the full decoded claim set
pub async fn me(DecodedToken(claims): DecodedToken) -> Json<Value> {
    Json(claims.into())
}

/// Return identifiers and timing of the current token
pub async fn session(DecodedToken(claims): DecodedToken) -> Json<SessionInfo> {
    let now = Utc::now().timestamp();

    Json(SessionInfo {
        jti: claims.jti().map(str::to_owned),
        issued_at: claims.iat(),
        expires_at: claims.exp(),
        expires_in: claims.exp().map(|exp| (exp - now).max(0)),
    })
}
