use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde_json::json;
use std::sync::Arc;

use crate::entities::category::Entity as CategoryEntity;
use crate::error::ApiError;
use crate::store::{
    self,
    categories::{CreateCategory, PatchCategory},
};

//ROUTERS
pub fn admin_category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/category", get(get_categories).post(create_category))
        .route("/category/stats", get(get_category_stats))
        .route(
            "/category/:id",
            get(get_category).patch(patch_category).delete(delete_category),
        )
        .layer(Extension(db))
}

//ROUTES
async fn get_categories(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = store::categories::list(&*db).await?;
    Ok((StatusCode::OK, Json(categories)))
}

async fn get_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let category = CategoryEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No category with {} id was found", id)))?;

    Ok((StatusCode::OK, Json(category)))
}

async fn create_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateCategory>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let category = store::categories::create(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(category)))
}

async fn patch_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchCategory>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let category = store::categories::update(&txn, id, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(category)))
}

async fn delete_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    store::categories::remove(&txn, id).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Resource deleted successfully"
        })),
    ))
}

async fn get_category_stats(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = store::categories::get_stats(&*db).await?;
    Ok((StatusCode::OK, Json(stats)))
}
