//! Token Codec and Middleware
//!
//! This module mints and verifies HMAC-signed session tokens and provides
//! the Axum middleware that guards protected routes with them.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - Token encoding, decoding and [`TokenConfig`]
//! - [`auth::claims`](crate::auth::claims) - Dynamic claim set with typed reserved claims
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware and extractor
//! - [`auth::random`](crate::auth::random) - Random hex identifiers for `jti`
//!
//! # Tokens
//!
//! - **Algorithm**: HS256 by default, HS384/HS512 on request; nothing outside
//!   the HMAC family is ever signed or accepted
//! - **Reserved claims**: `iat`, `exp` (= `iat` + expiry) and a 64 character hex `jti`
//! - **Expiry**: 60 minutes unless configured, enforced by the middleware
//!
//! # Usage
//!
//! ## Minting and verifying
//!
//! ```ignore
//! use jwt_gate::auth::{TokenConfig, decode, encode};
//!
//! let config = TokenConfig::new("shared-secret").with_expiry_minutes(15);
//! let minted = encode(&payload, &config)?;
//! let claims = decode(&minted.token, &config)?;
//! ```
//!
//! ## Middleware
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/protected", get(handler))
//!     .layer(middleware::from_fn_with_state(Arc::new(config), auth_middleware));
//! ```
//!
//! The token is read from `Authorization: Bearer <token>` or the `jwt`
//! cookie. Any failure answers `401` with an empty body.
//!
//! ## Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(DecodedToken(claims): DecodedToken) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.get("sub").unwrap_or(&Value::Null))
//! }
//! ```

/// Claim set type and reserved claim names.
pub mod claims;
/// Token encoding/decoding and signing configuration.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Random identifiers backed by the OS CSPRNG.
pub mod random;

pub use claims::{Claims, ReservedClaimPolicy};
pub use jwt::{EncodedToken, TokenConfig, decode, encode, encode_at, encode_value};
pub use middleware::{DecodedToken, auth_middleware};
pub use random::random_hex;
