use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A customer's request for one catalog product. Stock is checked at
/// creation but only decremented on the transition to `Sold`.
///
/// `catalog_id` and `customer_id` are plain references without enforced
/// foreign keys: products and customers delete unconditionally and an order
/// may outlive both (joins surface the product as `None`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub catalog_id: i32,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub delivery_fee: f32,
    pub delivery_destination: String,
    pub date_stock_sold: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status: Status,
    pub created_at: i64,
}

// `Pending` is carried in the data model but no code path transitions into
// or out of it; kept until product intent is clarified.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    enum_name = "order_status",
    db_type = "String(StringLen::N(255))",
    rs_type = "String"
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[sea_orm(string_value = "in_stock")]
    InStock,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "pending")]
    Pending,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "sold" => Ok(Self::Sold),
            "pending" => Ok(Self::Pending),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
