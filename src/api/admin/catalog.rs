use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::catalog::Entity as CatalogEntity;
use crate::error::ApiError;
use crate::store::{
    self,
    catalog::{CreateCatalogItem, PatchCatalogItem},
};

//ROUTERS
pub fn admin_catalog_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/catalog", get(get_products).post(create_product))
        .route("/catalog/stats", get(get_catalog_stats))
        .route(
            "/catalog/:id",
            get(get_product).patch(patch_product).delete(delete_product),
        )
        .route("/catalog/:id/stock", patch(patch_stock))
        .layer(Extension(db))
}

//ROUTES
async fn get_products(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = store::catalog::list(&*db).await?;
    Ok((StatusCode::OK, Json(products)))
}

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let product = CatalogEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No product with {} id was found", id)))?;

    Ok((StatusCode::OK, Json(product)))
}

async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateCatalogItem>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let product = store::catalog::create(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(product)))
}

async fn patch_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchCatalogItem>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let product = store::catalog::update(&txn, id, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(product)))
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    store::catalog::remove(&txn, id).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Resource deleted successfully"
        })),
    ))
}

async fn patch_stock(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchStock>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let product = store::catalog::update_stock(&txn, id, payload.quantity).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(product)))
}

async fn get_catalog_stats(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = store::catalog::get_stats(&*db).await?;
    Ok((StatusCode::OK, Json(stats)))
}

//Structs
#[derive(Deserialize, Debug)]
struct PatchStock {
    quantity: i32,
}
