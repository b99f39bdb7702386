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

use crate::entities::customer::Entity as CustomerEntity;
use crate::error::ApiError;
use crate::store::{
    self,
    customers::{CreateCustomer, PatchCustomer},
};

//ROUTERS
pub fn admin_customer_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/customer", get(get_customers).post(create_customer))
        .route("/customer/stats", get(get_customer_stats))
        .route(
            "/customer/:id",
            get(get_customer).patch(patch_customer).delete(delete_customer),
        )
        .layer(Extension(db))
}

//ROUTES
async fn get_customers(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = store::customers::list(&*db).await?;
    Ok((StatusCode::OK, Json(customers)))
}

async fn get_customer(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = CustomerEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No customer with {} id was found", id)))?;

    Ok((StatusCode::OK, Json(customer)))
}

async fn create_customer(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateCustomer>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let customer = store::customers::create(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

async fn patch_customer(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchCustomer>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let customer = store::customers::update(&txn, id, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(customer)))
}

async fn delete_customer(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    store::customers::remove(&txn, id).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Resource deleted successfully"
        })),
    ))
}

async fn get_customer_stats(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = store::customers::get_stats(&*db).await?;
    Ok((StatusCode::OK, Json(stats)))
}
