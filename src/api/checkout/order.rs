use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;

use crate::error::ApiError;
use crate::store::{self, orders::CreateOrder};

//ROUTERS
pub fn checkout_order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/order", post(submit_order))
        .layer(Extension(db))
}

//ROUTES
// The storefront submits one order per cart line. Stock was never reserved
// while the item sat in the client cart, so the availability check here is
// the first authoritative one.
async fn submit_order(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateOrder>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;
    let order = store::orders::create(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(order)))
}
