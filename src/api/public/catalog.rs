use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::error::ApiError;
use crate::store;

//ROUTERS
pub fn catalog_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/catalog", get(get_products))
        .route("/catalog/featured", get(get_featured))
        .route("/catalog/category/:id", get(get_by_category))
        .route("/catalog/slug/:slug", get(get_by_slug))
        .layer(Extension(db))
}

//ROUTES
async fn get_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = store::catalog::list_active(&*db).await?;
    Ok((StatusCode::OK, Json(products)))
}

async fn get_featured(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = store::catalog::list_featured(&*db).await?;
    Ok((StatusCode::OK, Json(products)))
}

async fn get_by_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = store::catalog::list_by_category(&*db, id).await?;
    Ok((StatusCode::OK, Json(products)))
}

async fn get_by_slug(
    Path(slug): Path<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let product = store::catalog::get_by_slug(&*db, &slug).await?;
    Ok((StatusCode::OK, Json(product)))
}
