//! HTTP API Handlers and Routes
//!
//! A small Axum surface that puts the auth middleware in front of a couple
//! of endpoints, so tokens minted by the codec can be exercised over HTTP.
//!
//! # API Endpoints
//!
//! - `GET /health` - Health check endpoint (public)
//! - `GET /api/me` - Decoded claims of the presented token
//! - `GET /api/session` - `jti`, issue and expiry times of the presented token
//!
//! # Authentication
//!
//! Endpoints under `/api` require a valid token, either in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//! or in a `jwt` cookie. Failures answer `401` with an empty body.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
