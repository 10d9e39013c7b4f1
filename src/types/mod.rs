use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

// ============= Error Types =============

/// Errors raised while minting, verifying or extracting tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("secret is required")]
    MissingSecret,

    #[error("token is required")]
    MissingToken,

    #[error("authorization header malformed")]
    MalformedAuthorization,

    #[error("payload must be a JSON object")]
    InvalidPayload,

    #[error("payload key '{0}' collides with a reserved claim")]
    ReservedClaim(String),

    #[error("error signing token: {0}")]
    Signing(String),

    #[error("random source unavailable: {0}")]
    Entropy(String),

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("invalid signing method: {0}")]
    InvalidSigningMethod(String),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("token has no integer 'exp' claim")]
    MissingExpiry,

    #[error("token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },
}

/// Coarse classification of a [`TokenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration is unusable (no secret).
    Config,
    /// Caller input is missing or unacceptable.
    Input,
    /// The token could not be produced.
    Signing,
    /// The token is not a well-formed compact serialization.
    Parse,
    /// The signature or its algorithm does not check out.
    Signature,
    /// The token is past its `exp`.
    Expiry,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::MissingSecret => ErrorKind::Config,
            TokenError::MissingToken
            | TokenError::MalformedAuthorization
            | TokenError::InvalidPayload
            | TokenError::ReservedClaim(_) => ErrorKind::Input,
            TokenError::Signing(_) | TokenError::Entropy(_) => ErrorKind::Signing,
            TokenError::Malformed(_) => ErrorKind::Parse,
            TokenError::InvalidSigningMethod(_) | TokenError::InvalidSignature => {
                ErrorKind::Signature
            }
            TokenError::MissingExpiry | TokenError::Expired { .. } => ErrorKind::Expiry,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                TokenError::InvalidSigningMethod(err.to_string())
            }
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

impl IntoResponse for TokenError {
    // Every variant collapses to a bare 401 so clients cannot tell
    // a bad signature from an expired token.
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
