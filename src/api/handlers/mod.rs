//! API request handlers.

/// Handlers that echo the authenticated session.
pub mod session;
