use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::order::Status;
use crate::error::ApiError;
use crate::store::{
    self,
    orders::{CreateOrder, PatchOrder},
};

//ROUTERS
pub fn admin_order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/order", get(get_orders).post(create_order))
        .route("/order/sales", get(get_sales))
        .route("/order/stats", get(get_order_stats))
        .route("/order/:id", patch(patch_order).delete(delete_order))
        .route("/order/:id/sold", post(mark_as_sold))
        .layer(Extension(db))
}

//ROUTES
async fn get_orders(
    Query(params): Query<GetOrdersQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    if params.with_products.unwrap_or(false) {
        let orders = store::orders::list_with_products(&*db).await?;
        return Ok((StatusCode::OK, Json(orders)).into_response());
    }

    if let Some(status) = params.status {
        let orders = store::orders::list_by_status(&*db, status).await?;
        return Ok((StatusCode::OK, Json(orders)).into_response());
    }

    let orders = store::orders::list(&*db).await?;
    Ok((StatusCode::OK, Json(orders)).into_response())
}

async fn get_sales(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = store::orders::get_sales_with_products(&*db).await?;
    Ok((StatusCode::OK, Json(sales)))
}

async fn create_order(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let order = store::orders::create(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(order)))
}

async fn patch_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let order = store::orders::update(&txn, id, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(order)))
}

async fn delete_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    store::orders::remove(&txn, id).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Resource deleted successfully"
        })),
    ))
}

async fn mark_as_sold(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<MarkAsSold>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let order = store::orders::mark_as_sold(&txn, id, payload.date_stock_sold).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(order)))
}

async fn get_order_stats(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = store::orders::get_stats(&*db).await?;
    Ok((StatusCode::OK, Json(stats)))
}

//Structs
#[derive(Deserialize)]
struct GetOrdersQuery {
    with_products: Option<bool>,
    status: Option<Status>,
}

#[derive(Deserialize, Debug)]
struct MarkAsSold {
    date_stock_sold: String,
}
