use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Sellable item definition. Orders reference rows of this table; the
/// `stock_quantity` counter is only ever decremented when an order is sold.
///
/// `category_id` is a plain reference, not an enforced foreign key: deleting
/// a category orphans its products rather than cascading into them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "product_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category_id: i32,
    pub base_price: f32,
    pub cost_price: f32,
    #[sea_orm(unique)]
    pub sku: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Json")]
    pub colors: StringList,
    #[sea_orm(column_type = "Json")]
    pub sizes: StringList,
    #[sea_orm(column_type = "Json")]
    pub materials: StringList,
    #[sea_orm(column_type = "Json")]
    pub dimensions: Dimensions,
    pub weight: f32,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    #[sea_orm(column_type = "Json")]
    pub image_urls: StringList,
    #[sea_orm(column_type = "Json")]
    pub tags: StringList,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Dimensions {
    pub length: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
