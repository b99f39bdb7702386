pub mod order;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};
use order::checkout_order_router;

/// Order submission. Requires an authenticated identity of any role; the
/// middleware redirects anonymous requests to `/`.
pub fn checkout_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .nest("/", checkout_order_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Role::User,
            },
            auth_middleware,
        ))
}
