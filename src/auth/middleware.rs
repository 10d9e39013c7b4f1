use crate::auth::claims::Claims;
use crate::auth::jwt::{TokenConfig, decode};
use crate::types::{Result, TokenError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Cookie consulted when no `Authorization` header is sent.
pub const TOKEN_COOKIE: &str = "jwt";

/// Name of the request context slot holding the decoded claims. In axum the
/// slot is the [`DecodedToken`] request extension.
pub const DECODED_TOKEN_KEY: &str = "decodedToken";

/// Claims of the token that authorized the current request.
#[derive(Debug, Clone)]
pub struct DecodedToken(pub Claims);

impl DecodedToken {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn into_claims(self) -> Claims {
        self.0
    }
}

/// Rejects the request with a bare 401 unless it carries a valid,
/// unexpired token. On success the claims are stored as a
/// [`DecodedToken`] extension for downstream handlers.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn_with_state(config.clone(), auth_middleware));
/// ```
pub async fn auth_middleware(
    State(config): State<Arc<TokenConfig>>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, TokenError> {
    let claims = authorize(req.headers(), &config, Utc::now().timestamp()).inspect_err(|e| {
        debug!(error = %e, kind = ?e.kind(), "rejecting unauthenticated request");
    })?;

    req.extensions_mut().insert(DecodedToken(claims));

    Ok(next.run(req).await)
}

/// Runs the whole check against `headers` with the clock at `now`.
pub fn authorize(headers: &HeaderMap, config: &TokenConfig, now: i64) -> Result<Claims> {
    let token = extract_token(headers)?;
    let claims = decode(&token, config)?;

    let exp = claims.exp().ok_or(TokenError::MissingExpiry)?;
    if exp < now {
        return Err(TokenError::Expired { exp, now });
    }

    Ok(claims)
}

/// Finds the token: `Authorization: Bearer <token>` first, then the
/// `jwt` cookie.
pub fn extract_token(headers: &HeaderMap) -> Result<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let raw = value
            .to_str()
            .map_err(|_| TokenError::MalformedAuthorization)?;
        return parse_bearer(raw);
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim().to_owned())
        .filter(|token| !token.is_empty())
        .ok_or(TokenError::MissingToken)
}

fn parse_bearer(raw: &str) -> Result<String> {
    let (scheme, token) = raw
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(TokenError::MalformedAuthorization)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(TokenError::MalformedAuthorization);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::MissingToken);
    }
    if token.contains(char::is_whitespace) {
        return Err(TokenError::MalformedAuthorization);
    }

    Ok(token.to_owned())
}

// Extractor for claims stored by `auth_middleware`
impl<S> FromRequestParts<S> for DecodedToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DecodedToken>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
