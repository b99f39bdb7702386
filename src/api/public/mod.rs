pub mod auth;
pub mod catalog;
pub mod category;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use auth::auth_router;
use catalog::catalog_router;
use category::category_router;

pub fn public_api_router(db: Arc<DatabaseConnection>) -> Router {
    let auth_router = auth_router(db.clone());
    let category_router = category_router(db.clone());
    let catalog_router = catalog_router(db.clone());

    Router::new()
        .nest("/", auth_router)
        .nest("/", category_router)
        .nest("/", catalog_router)
}
