use crate::entities::user::{Entity as UserEntity, Role};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use thiserror::Error;

/// Guards the `/api/checkout` and `/api/admin` prefixes. Requests without a
/// valid identity are redirected to the home path rather than answered with
/// an error body.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let db = state.db;
    let role = state.role;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) => token,
            None => return Err(Redirect::to("/")),
        },
        None => return Err(Redirect::to("/")),
    };

    let claims = match validate_token(db, token, role).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "rejected request to protected route");
            return Err(Redirect::to("/"));
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub role: String,
    pub exp: usize,
}

#[derive(Clone, Debug)]
pub struct AuthState {
    pub db: Arc<DatabaseConnection>,
    pub role: Role,
}

pub fn generate_token(user_id: i32, role: Role) -> Result<String, AuthMiddlewareError> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or(AuthMiddlewareError::GenerationFail)?
        .timestamp() as usize;

    let claims = Claims {
        user_id,
        role: role.as_str().to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_secret_key().as_bytes()),
    )
    .map_err(|_| AuthMiddlewareError::GenerationFail)
}

pub async fn validate_token(
    db: Arc<DatabaseConnection>,
    token: &str,
    req_role: Role,
) -> Result<Claims, AuthMiddlewareError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_secret_key().as_bytes()),
        &validation,
    )
    .map_err(|_| AuthMiddlewareError::TokenExpired)?;

    let claims = token_data.claims;

    let role = Role::from_str(&claims.role)
        .map_err(|_| AuthMiddlewareError::InvalidUserOrRole)?;

    let user = UserEntity::find_by_id(claims.user_id)
        .one(&*db)
        .await
        .map_err(|_| AuthMiddlewareError::InternalServerError)?
        .ok_or(AuthMiddlewareError::InvalidUserOrRole)?;

    if user.role != role {
        return Err(AuthMiddlewareError::InvalidUserOrRole);
    }

    // An admin token also satisfies user-level routes.
    match (req_role, role) {
        (Role::Admin, Role::Admin) => Ok(claims),
        (Role::User, _) => Ok(claims),
        _ => Err(AuthMiddlewareError::InvalidUserOrRole),
    }
}

#[derive(Error, Debug)]
pub enum AuthMiddlewareError {
    #[error("Invalid user id or role")]
    InvalidUserOrRole,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to generate token")]
    GenerationFail,
    #[error("Internal server error")]
    InternalServerError,
}

fn get_secret_key() -> String {
    dotenvy::dotenv().ok();
    std::env::var("SECRET").expect("SECRET not found in .env file")
}

pub fn hash_password(password: &str) -> Result<String, String> {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| "Failed to hash password".to_string())?;

    Ok(hash.to_string())
}
