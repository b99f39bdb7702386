#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;
use tower::ServiceExt;

use bagshop::api::create_api_router;
use bagshop::entities::catalog::Dimensions;
use bagshop::entities::user::{self, Role};
use bagshop::entities::{catalog, category, setup_schema};
use bagshop::middleware::auth::{generate_token, hash_password};
use bagshop::store;
use bagshop::store::catalog::CreateCatalogItem;
use bagshop::store::categories::CreateCategory;
use bagshop::store::orders::CreateOrder;

/// Fresh in-memory database with the schema applied. A single pooled
/// connection so every query sees the same memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory sqlite");
    setup_schema(&db).await;
    db
}

pub async fn setup_app() -> (axum::Router, DatabaseConnection) {
    std::env::set_var("SECRET", "integration-test-secret");
    let db = setup_db().await;
    let app = create_api_router(Arc::new(db.clone()));
    (app, db)
}

pub async fn seed_admin(db: &DatabaseConnection) -> String {
    std::env::set_var("SECRET", "integration-test-secret");
    let password = hash_password("Secret15").expect("Failed to hash password");
    let admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password: Set(password),
        role: Set(Role::Admin),
        ..Default::default()
    };
    let admin = admin.insert(db).await.expect("Failed to seed admin");
    generate_token(admin.id, Role::Admin).expect("Failed to generate token")
}

pub async fn seed_user(db: &DatabaseConnection) -> String {
    std::env::set_var("SECRET", "integration-test-secret");
    let password = hash_password("Secret15").expect("Failed to hash password");
    let user = user::ActiveModel {
        username: Set("user".to_owned()),
        password: Set(password),
        role: Set(Role::User),
        ..Default::default()
    };
    let user = user.insert(db).await.expect("Failed to seed user");
    generate_token(user.id, Role::User).expect("Failed to generate token")
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> category::Model {
    store::categories::create(
        db,
        CreateCategory {
            name: name.to_owned(),
            description: format!("{} bags", name),
            image_url: None,
        },
    )
    .await
    .expect("Failed to seed category")
}

pub fn product_payload(
    name: &str,
    category_id: i32,
    base_price: f32,
    cost_price: f32,
    stock_quantity: i32,
) -> CreateCatalogItem {
    CreateCatalogItem {
        name: name.to_owned(),
        description: "A sturdy bag".to_owned(),
        category_id,
        base_price,
        cost_price,
        sku: None,
        colors: vec!["black".to_owned()],
        sizes: vec!["M".to_owned()],
        materials: vec!["canvas".to_owned()],
        dimensions: Dimensions {
            length: 40.0,
            width: 12.0,
            height: 35.0,
        },
        weight: 0.6,
        stock_quantity,
        min_stock_level: 1,
        image_urls: vec![],
        tags: vec![],
    }
}

pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i32,
    base_price: f32,
    cost_price: f32,
    stock_quantity: i32,
) -> catalog::Model {
    store::catalog::create(
        db,
        product_payload(name, category_id, base_price, cost_price, stock_quantity),
    )
    .await
    .expect("Failed to seed product")
}

pub fn order_payload(catalog_id: i32, customer_id: Option<i32>, delivery_fee: f32) -> CreateOrder {
    CreateOrder {
        catalog_id,
        customer_id,
        customer_name: "Ada".to_owned(),
        customer_phone: "+2348000000000".to_owned(),
        customer_email: "ada@example.com".to_owned(),
        customer_address: "12 Market Road".to_owned(),
        delivery_fee,
        delivery_destination: "Lagos".to_owned(),
        notes: None,
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}

pub async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}
