pub mod catalog;
pub mod category;
pub mod customer;
pub mod order;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use catalog::admin_catalog_router;
use category::admin_category_router;
use customer::admin_customer_router;
use order::admin_order_router;

use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};

pub fn admin_api_router(db: Arc<DatabaseConnection>) -> Router {
    let admin_category_router = admin_category_router(db.clone());
    let admin_catalog_router = admin_catalog_router(db.clone());
    let admin_customer_router = admin_customer_router(db.clone());
    let admin_order_router = admin_order_router(db.clone());

    Router::new()
        .nest("/", admin_category_router)
        .nest("/", admin_catalog_router)
        .nest("/", admin_customer_router)
        .nest("/", admin_order_router)
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Role::Admin,
            },
            auth_middleware,
        ))
}
