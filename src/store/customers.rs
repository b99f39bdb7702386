use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::customer::{self, Entity as CustomerEntity, Status};
use crate::entities::now_millis;
use crate::error::ApiError;

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<customer::Model>, ApiError> {
    let customers = CustomerEntity::find()
        .order_by_desc(customer::Column::Id)
        .all(db)
        .await?;
    Ok(customers)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    payload: CreateCustomer,
) -> Result<customer::Model, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let existing = CustomerEntity::find()
        .filter(customer::Column::Email.eq(payload.email.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "Customer with this email already exists".to_string(),
        ));
    }

    let new_customer = customer::ActiveModel {
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        address: Set(payload.address),
        total_orders: Set(0),
        total_spent: Set(0.0),
        last_order_date: Set(None),
        status: Set(Status::Active),
        join_date: Set(chrono::Utc::now().format("%Y-%m-%d").to_string()),
        created_at: Set(now_millis()),
        ..Default::default()
    };

    let customer = new_customer.insert(db).await?;
    Ok(customer)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    payload: PatchCustomer,
) -> Result<customer::Model, ApiError> {
    let customer = CustomerEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No customer with {} id was found", id)))?;

    let mut customer: customer::ActiveModel = customer.into();

    if let Some(email) = payload.email {
        let existing = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email.clone()))
            .filter(customer::Column::Id.ne(id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(
                "Customer with this email already exists".to_string(),
            ));
        }
        customer.email = Set(email);
    }

    if let Some(name) = payload.name {
        customer.name = Set(name);
    }
    if let Some(phone) = payload.phone {
        customer.phone = Set(phone);
    }
    if let Some(address) = payload.address {
        customer.address = Set(address);
    }
    if let Some(status) = payload.status {
        customer.status = Set(status);
    }

    let customer = customer.update(db).await?;
    Ok(customer)
}

pub async fn remove<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    let customer = CustomerEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No customer with {} id was found", id)))?;

    let customer: customer::ActiveModel = customer.into();
    customer.delete(db).await?;
    Ok(())
}

pub async fn get_stats<C: ConnectionTrait>(db: &C) -> Result<CustomerStats, ApiError> {
    let customers = CustomerEntity::find().all(db).await?;

    let total_customers = customers.len();
    let active_customers = customers
        .iter()
        .filter(|c| c.status == Status::Active)
        .count();
    let total_revenue: f32 = customers.iter().map(|c| c.total_spent).sum();
    let total_orders: i32 = customers.iter().map(|c| c.total_orders).sum();
    let avg_order_value = if total_orders > 0 {
        total_revenue / total_orders as f32
    } else {
        0.0
    };

    Ok(CustomerStats {
        total_customers,
        active_customers,
        total_revenue,
        avg_order_value,
    })
}

//Structs
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Customer email is malformed"))]
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Deserialize, Debug)]
pub struct PatchCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<Status>,
}

#[derive(Serialize, Debug)]
pub struct CustomerStats {
    pub total_customers: usize,
    pub active_customers: usize,
    pub total_revenue: f32,
    pub avg_order_value: f32,
}
