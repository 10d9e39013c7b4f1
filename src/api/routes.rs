use crate::auth::jwt::TokenConfig;
use crate::auth::middleware::auth_middleware;
use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn create_router(config: Arc<TokenConfig>) -> Router {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/health", get(|| async { "OK" }));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/me", get(crate::api::handlers::session::me))
        .route("/session", get(crate::api::handlers::session::session))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    public_routes
        .nest("/api", protected_routes)
        .layer(TraceLayer::new_for_http())
}
