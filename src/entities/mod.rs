pub mod catalog;
pub mod category;
pub mod customer;
pub mod order;
pub mod user;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Schema, Set,
};

use crate::entities::{
    catalog::Entity as Catalog, category::Entity as Category, customer::Entity as Customer,
    order::Entity as Order, user::Entity as User,
};

pub async fn setup_schema(db: &DatabaseConnection) {
    let schema = Schema::new(db.get_database_backend());
    let create_category_table = schema.create_table_from_entity(Category);
    let create_catalog_table = schema.create_table_from_entity(Catalog);
    let create_order_table = schema.create_table_from_entity(Order);
    let create_customer_table = schema.create_table_from_entity(Customer);
    let create_user_table = schema.create_table_from_entity(User);

    db.execute(db.get_database_backend().build(&create_category_table))
        .await
        .expect("Failed to create category schema");
    db.execute(db.get_database_backend().build(&create_catalog_table))
        .await
        .expect("Failed to create catalog schema");
    db.execute(db.get_database_backend().build(&create_order_table))
        .await
        .expect("Failed to create order schema");
    db.execute(db.get_database_backend().build(&create_customer_table))
        .await
        .expect("Failed to create customer schema");
    db.execute(db.get_database_backend().build(&create_user_table))
        .await
        .expect("Failed to create user schema");
}

/// Seeds the initial admin account; no-op when it already exists.
pub async fn primary_setup(db: &DatabaseConnection) {
    let existing = User::find()
        .filter(user::Column::Username.eq("admin"))
        .one(db)
        .await
        .expect("Failed to look up admin account");

    if existing.is_some() {
        return;
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Secret15".to_owned());

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .expect("Failed to hash password")
        .to_string();

    let new_admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password: Set(password_hash),
        role: Set(user::Role::Admin),
        ..Default::default()
    };

    User::insert(new_admin)
        .exec(db)
        .await
        .expect("Failed to seed admin account");
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
