use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::user::{self, Entity as UserEntity, Role};
use crate::error::ApiError;
use crate::middleware::auth::{generate_token, hash_password};

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
        .layer(Extension(db))
}

//ROUTES
async fn register_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateUser>,
) -> Result<impl IntoResponse, ApiError> {
    let txn = db.begin().await?;

    let existing = UserEntity::find()
        .filter(user::Column::Username.eq(payload.username.clone()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Username already exists".to_string()));
    }

    let password = hash_password(&payload.password)
        .map_err(|_| ApiError::Validation("Failed to hash password".to_string()))?;

    let new_user = user::ActiveModel {
        username: Set(payload.username),
        password: Set(password),
        role: Set(Role::User),
        ..Default::default()
    };

    new_user.insert(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully"
        })),
    ))
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UserLogin>,
) -> Result<impl IntoResponse, ApiError> {
    let user = UserEntity::find()
        .filter(user::Column::Username.eq(payload.username.clone()))
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::Validation("Invalid username or password".to_string()))?;

    user.check_hash(&payload.password)
        .map_err(|_| ApiError::Validation("Invalid username or password".to_string()))?;

    let token = generate_token(user.id, user.role)
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "token": token
        })),
    ))
}

//Structs
#[derive(Deserialize, Clone, Debug)]
struct CreateUser {
    username: String,
    password: String,
}

#[derive(Deserialize, Clone, Debug)]
struct UserLogin {
    username: String,
    password: String,
}
