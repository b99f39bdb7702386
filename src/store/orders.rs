use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::entities::catalog::{self, Entity as CatalogEntity};
use crate::entities::category::Entity as CategoryEntity;
use crate::entities::customer::{self, Entity as CustomerEntity};
use crate::entities::now_millis;
use crate::entities::order::{self, Entity as OrderEntity, Status};
use crate::error::ApiError;

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<order::Model>, ApiError> {
    let orders = OrderEntity::find()
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders)
}

pub async fn list_by_status<C: ConnectionTrait>(
    db: &C,
    status: Status,
) -> Result<Vec<order::Model>, ApiError> {
    let orders = OrderEntity::find()
        .filter(order::Column::Status.eq(status))
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders)
}

pub async fn list_with_products<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<OrderWithProduct>, ApiError> {
    let orders = OrderEntity::find()
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    attach_products(db, orders).await
}

pub async fn get_sales_with_products<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<OrderWithProduct>, ApiError> {
    let sales = OrderEntity::find()
        .filter(order::Column::Status.eq(Status::Sold))
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;
    attach_products(db, sales).await
}

/// Joins orders to their products in application code. `catalog_id` carries
/// no foreign key, so an order may point at a product that has since been
/// deleted; such orders surface with `product: None`.
async fn attach_products<C: ConnectionTrait>(
    db: &C,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderWithProduct>, ApiError> {
    let products: HashMap<i32, catalog::Model> = CatalogEntity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| {
            let product = products.get(&order.catalog_id).cloned();
            OrderWithProduct { order, product }
        })
        .collect())
}

/// Creates an order in `in_stock` status. Availability is checked here but
/// stock is not reserved; it is only decremented by [`mark_as_sold`].
pub async fn create<C: ConnectionTrait>(
    db: &C,
    payload: CreateOrder,
) -> Result<order::Model, ApiError> {
    let product = CatalogEntity::find_by_id(payload.catalog_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found in catalog".to_string()))?;

    if !product.is_active {
        return Err(ApiError::State("Product is not active".to_string()));
    }

    if product.stock_quantity <= 0 {
        return Err(ApiError::State(format!("{} is out of stock", product.name)));
    }

    if let Some(customer_id) = payload.customer_id {
        if let Some(customer) = CustomerEntity::find_by_id(customer_id).one(db).await? {
            let total_orders = customer.total_orders;
            let mut customer: customer::ActiveModel = customer.into();
            customer.total_orders = Set(total_orders + 1);
            customer.update(db).await?;
        }
    }

    let new_order = order::ActiveModel {
        catalog_id: Set(payload.catalog_id),
        customer_id: Set(payload.customer_id),
        customer_name: Set(payload.customer_name),
        customer_phone: Set(payload.customer_phone),
        customer_email: Set(payload.customer_email),
        customer_address: Set(payload.customer_address),
        delivery_fee: Set(payload.delivery_fee),
        delivery_destination: Set(payload.delivery_destination),
        date_stock_sold: Set(None),
        notes: Set(payload.notes),
        status: Set(Status::InStock),
        created_at: Set(now_millis()),
        ..Default::default()
    };

    let order = new_order.insert(db).await?;
    Ok(order)
}

/// Transitions an order to `sold`: decrements the product's stock by one,
/// updates the linked customer's spend aggregates and stamps the sale date.
///
/// The decrement is a single conditional UPDATE guarded by
/// `stock_quantity > 0`, so two concurrent sales of the last unit cannot
/// both succeed.
pub async fn mark_as_sold<C: ConnectionTrait>(
    db: &C,
    id: i32,
    date_stock_sold: String,
) -> Result<order::Model, ApiError> {
    let order = OrderEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    let product = CatalogEntity::find_by_id(order.catalog_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found in catalog".to_string()))?;

    let result = CatalogEntity::update_many()
        .col_expr(
            catalog::Column::StockQuantity,
            Expr::col(catalog::Column::StockQuantity).sub(1),
        )
        .filter(catalog::Column::Id.eq(product.id))
        .filter(catalog::Column::StockQuantity.gt(0))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApiError::State(format!(
            "Cannot complete sale: {} is out of stock",
            product.name
        )));
    }

    if let Some(customer_id) = order.customer_id {
        if let Some(customer) = CustomerEntity::find_by_id(customer_id).one(db).await? {
            let total_spent = customer.total_spent + product.base_price + order.delivery_fee;
            let mut customer: customer::ActiveModel = customer.into();
            customer.total_spent = Set(total_spent);
            customer.last_order_date = Set(Some(date_stock_sold.clone()));
            customer.update(db).await?;
        }
    }

    let mut order: order::ActiveModel = order.into();
    order.status = Set(Status::Sold);
    order.date_stock_sold = Set(Some(date_stock_sold));

    let order = order.update(db).await?;
    Ok(order)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    payload: PatchOrder,
) -> Result<order::Model, ApiError> {
    let order = OrderEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    let mut order: order::ActiveModel = order.into();

    if let Some(customer_id) = payload.customer_id {
        order.customer_id = Set(Some(customer_id));
    }
    if let Some(customer_name) = payload.customer_name {
        order.customer_name = Set(customer_name);
    }
    if let Some(customer_phone) = payload.customer_phone {
        order.customer_phone = Set(customer_phone);
    }
    if let Some(customer_email) = payload.customer_email {
        order.customer_email = Set(customer_email);
    }
    if let Some(customer_address) = payload.customer_address {
        order.customer_address = Set(customer_address);
    }
    if let Some(delivery_fee) = payload.delivery_fee {
        order.delivery_fee = Set(delivery_fee);
    }
    if let Some(delivery_destination) = payload.delivery_destination {
        order.delivery_destination = Set(delivery_destination);
    }
    if let Some(date_stock_sold) = payload.date_stock_sold {
        order.date_stock_sold = Set(Some(date_stock_sold));
    }
    if let Some(notes) = payload.notes {
        order.notes = Set(Some(notes));
    }
    if let Some(status) = payload.status {
        order.status = Set(status);
    }

    let order = order.update(db).await?;
    Ok(order)
}

/// Unconditional removal. Stock was never reserved for unsold orders and a
/// completed sale is not reversed, so nothing else is adjusted.
pub async fn remove<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    let order = OrderEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    let order: order::ActiveModel = order.into();
    order.delete(db).await?;
    Ok(())
}

/// Full-collection folds; revenue and cost only count sold orders.
pub async fn get_stats<C: ConnectionTrait>(db: &C) -> Result<OrderStats, ApiError> {
    let orders = list_with_products(db).await?;
    let categories = CategoryEntity::find().all(db).await?;

    let sales: Vec<&OrderWithProduct> = orders
        .iter()
        .filter(|o| o.order.status == Status::Sold)
        .collect();

    let total_orders = orders.len();
    let in_stock = orders
        .iter()
        .filter(|o| o.order.status == Status::InStock)
        .count();
    let sold = sales.len();
    let pending = orders
        .iter()
        .filter(|o| o.order.status == Status::Pending)
        .count();

    let total_revenue: f32 = sales
        .iter()
        .map(|s| s.product.as_ref().map_or(0.0, |p| p.base_price) + s.order.delivery_fee)
        .sum();
    let total_cost: f32 = sales
        .iter()
        .map(|s| s.product.as_ref().map_or(0.0, |p| p.cost_price))
        .sum();
    let profit = total_revenue - total_cost;

    let mut category_order_stats = BTreeMap::new();
    let mut category_sales_stats = BTreeMap::new();
    for category in &categories {
        let order_count = orders
            .iter()
            .filter(|o| o.product.as_ref().map(|p| p.category_id) == Some(category.id))
            .count();
        let sales_count = sales
            .iter()
            .filter(|s| s.product.as_ref().map(|p| p.category_id) == Some(category.id))
            .count();
        category_order_stats.insert(category.name.clone(), order_count);
        category_sales_stats.insert(category.name.clone(), sales_count);
    }

    let avg_order_value = if orders.is_empty() {
        0.0
    } else {
        orders
            .iter()
            .map(|o| o.product.as_ref().map_or(0.0, |p| p.base_price) + o.order.delivery_fee)
            .sum::<f32>()
            / orders.len() as f32
    };
    let avg_sale_value = if sales.is_empty() {
        0.0
    } else {
        total_revenue / sales.len() as f32
    };
    let avg_delivery_fee = if orders.is_empty() {
        0.0
    } else {
        orders.iter().map(|o| o.order.delivery_fee).sum::<f32>() / orders.len() as f32
    };

    Ok(OrderStats {
        total_orders,
        in_stock,
        sold,
        pending,
        category_order_stats,
        category_sales_stats,
        total_sales: sold,
        total_revenue,
        total_cost,
        profit,
        avg_order_value,
        avg_sale_value,
        avg_delivery_fee,
    })
}

//Structs
#[derive(Deserialize, Clone, Debug)]
pub struct CreateOrder {
    pub catalog_id: i32,
    pub customer_id: Option<i32>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub delivery_fee: f32,
    pub delivery_destination: String,
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PatchOrder {
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub delivery_fee: Option<f32>,
    pub delivery_destination: Option<String>,
    pub date_stock_sold: Option<String>,
    pub notes: Option<String>,
    pub status: Option<Status>,
}

#[derive(Serialize, Debug)]
pub struct OrderWithProduct {
    #[serde(flatten)]
    pub order: order::Model,
    pub product: Option<catalog::Model>,
}

#[derive(Serialize, Debug)]
pub struct OrderStats {
    pub total_orders: usize,
    pub in_stock: usize,
    pub sold: usize,
    pub pending: usize,
    pub category_order_stats: BTreeMap<String, usize>,
    pub category_sales_stats: BTreeMap<String, usize>,
    pub total_sales: usize,
    pub total_revenue: f32,
    pub total_cost: f32,
    pub profit: f32,
    pub avg_order_value: f32,
    pub avg_sale_value: f32,
    pub avg_delivery_fee: f32,
}
