pub mod admin;
pub mod checkout;
pub mod public;

use axum::{middleware::from_fn, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::middleware::logging::logging_middleware;
use admin::admin_api_router;
use checkout::checkout_api_router;
use public::public_api_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .nest("/api", public_api_router(shared_db.clone()))
        .nest("/api/checkout", checkout_api_router(shared_db.clone()))
        .nest("/api/admin", admin_api_router(shared_db))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
