use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::error::ApiError;
use crate::store;

//ROUTERS
pub fn category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/category", get(get_categories))
        .layer(Extension(db))
}

//ROUTES
async fn get_categories(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = store::categories::list_active(&*db).await?;
    Ok((StatusCode::OK, Json(categories)))
}
