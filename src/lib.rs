//! # jwt-gate
//!
//! HMAC-signed session tokens for Rust services: a token codec that mints
//! and verifies compact JWTs, and an Axum middleware that rejects requests
//! without a valid, unexpired token.
//!
//! ## Overview
//!
//! jwt-gate can be used in two ways:
//!
//! 1. **As a library** - mint tokens and guard your own Axum routes
//! 2. **As a binary** - the `jwt-gate` CLI mints and decodes tokens and can
//!    run a small demo server
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use jwt_gate::auth::{TokenConfig, auth_middleware, decode, encode};
//! use serde_json::{Map, json};
//! use std::sync::Arc;
//!
//! let config = TokenConfig::new("shared-secret");
//!
//! let mut payload = Map::new();
//! payload.insert("sub".into(), json!("user-1"));
//! let minted = encode(&payload, &config)?;
//!
//! let claims = decode(&minted.token, &config)?;
//! assert_eq!(claims.jti(), Some(minted.jti.as_str()));
//!
//! let app = Router::new()
//!     .route("/me", get(handler))
//!     .layer(middleware::from_fn_with_state(Arc::new(config), auth_middleware));
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Token codec, claims, middleware
//! - [`api`] - Demo routes guarded by the middleware
//! - [`cli`] - Command-line interface
//! - [`types`] - Error types
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Token codec and authentication middleware.
pub mod auth;
/// Command-line interface for the jwt-gate binary.
pub mod cli;
/// Core error types.
pub mod types;
/// Configuration utilities (TOML).
pub mod utils;

// Re-export commonly used types
pub use auth::{Claims, DecodedToken, EncodedToken, ReservedClaimPolicy, TokenConfig};
pub use types::{ErrorKind, Result, TokenError};
pub use utils::toml_config::{ConfigError, GateConfig};
