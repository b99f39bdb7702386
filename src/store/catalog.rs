use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::catalog::{self, Dimensions, Entity as CatalogEntity, StringList};
use crate::entities::now_millis;
use crate::error::ApiError;

static SKU_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^MCB-(\d{3})$").expect("valid regex"));
static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<catalog::Model>, ApiError> {
    let products = CatalogEntity::find()
        .order_by_desc(catalog::Column::Id)
        .all(db)
        .await?;
    Ok(products)
}

pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<catalog::Model>, ApiError> {
    let products = CatalogEntity::find()
        .filter(catalog::Column::IsActive.eq(true))
        .order_by_desc(catalog::Column::Id)
        .all(db)
        .await?;
    Ok(products)
}

pub async fn list_by_category<C: ConnectionTrait>(
    db: &C,
    category_id: i32,
) -> Result<Vec<catalog::Model>, ApiError> {
    let products = CatalogEntity::find()
        .filter(catalog::Column::CategoryId.eq(category_id))
        .filter(catalog::Column::IsActive.eq(true))
        .all(db)
        .await?;
    Ok(products)
}

pub async fn list_featured<C: ConnectionTrait>(db: &C) -> Result<Vec<catalog::Model>, ApiError> {
    let products = CatalogEntity::find()
        .filter(catalog::Column::IsActive.eq(true))
        .filter(catalog::Column::IsFeatured.eq(true))
        .order_by_desc(catalog::Column::Id)
        .all(db)
        .await?;
    Ok(products)
}

pub async fn get_by_slug<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<catalog::Model, ApiError> {
    let product = CatalogEntity::find()
        .filter(catalog::Column::Slug.eq(slug))
        .filter(catalog::Column::IsActive.eq(true))
        .one(db)
        .await?;

    product.ok_or_else(|| ApiError::NotFound(format!("No product with slug '{}' was found", slug)))
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    payload: CreateCatalogItem,
) -> Result<catalog::Model, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let slug = unique_slug(db, &payload.name).await?;

    let sku = match payload.sku {
        Some(sku) => {
            let existing = CatalogEntity::find()
                .filter(catalog::Column::Sku.eq(sku.clone()))
                .one(db)
                .await?;
            if existing.is_some() {
                return Err(ApiError::Conflict(
                    "Product with this SKU already exists".to_string(),
                ));
            }
            sku
        }
        None => next_sku(db).await?,
    };

    let new_product = catalog::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        category_id: Set(payload.category_id),
        base_price: Set(payload.base_price),
        cost_price: Set(payload.cost_price),
        sku: Set(sku),
        slug: Set(slug),
        colors: Set(StringList(payload.colors)),
        sizes: Set(StringList(payload.sizes)),
        materials: Set(StringList(payload.materials)),
        dimensions: Set(payload.dimensions),
        weight: Set(payload.weight),
        stock_quantity: Set(payload.stock_quantity),
        min_stock_level: Set(payload.min_stock_level),
        image_urls: Set(StringList(payload.image_urls)),
        tags: Set(StringList(payload.tags)),
        is_active: Set(true),
        is_featured: Set(false),
        created_at: Set(now_millis()),
        ..Default::default()
    };

    let product = new_product.insert(db).await?;
    Ok(product)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    payload: PatchCatalogItem,
) -> Result<catalog::Model, ApiError> {
    let product = CatalogEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No product with {} id was found", id)))?;

    let mut product: catalog::ActiveModel = product.into();

    if let Some(slug) = payload.slug {
        let existing = CatalogEntity::find()
            .filter(catalog::Column::Slug.eq(slug.clone()))
            .filter(catalog::Column::Id.ne(id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(
                "Product with this slug already exists".to_string(),
            ));
        }
        product.slug = Set(slug);
    }

    if let Some(sku) = payload.sku {
        if !SKU_RE.is_match(&sku) {
            return Err(ApiError::Validation(format!(
                "SKU '{}' is malformed, expected MCB- followed by three digits",
                sku
            )));
        }
        let existing = CatalogEntity::find()
            .filter(catalog::Column::Sku.eq(sku.clone()))
            .filter(catalog::Column::Id.ne(id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(
                "Product with this SKU already exists".to_string(),
            ));
        }
        product.sku = Set(sku);
    }

    if let Some(name) = payload.name {
        product.name = Set(name);
    }
    if let Some(description) = payload.description {
        product.description = Set(description);
    }
    if let Some(category_id) = payload.category_id {
        product.category_id = Set(category_id);
    }
    if let Some(base_price) = payload.base_price {
        product.base_price = Set(base_price);
    }
    if let Some(cost_price) = payload.cost_price {
        product.cost_price = Set(cost_price);
    }
    if let Some(colors) = payload.colors {
        product.colors = Set(StringList(colors));
    }
    if let Some(sizes) = payload.sizes {
        product.sizes = Set(StringList(sizes));
    }
    if let Some(materials) = payload.materials {
        product.materials = Set(StringList(materials));
    }
    if let Some(dimensions) = payload.dimensions {
        product.dimensions = Set(dimensions);
    }
    if let Some(weight) = payload.weight {
        product.weight = Set(weight);
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        product.stock_quantity = Set(stock_quantity);
    }
    if let Some(min_stock_level) = payload.min_stock_level {
        product.min_stock_level = Set(min_stock_level);
    }
    if let Some(image_urls) = payload.image_urls {
        product.image_urls = Set(StringList(image_urls));
    }
    if let Some(tags) = payload.tags {
        product.tags = Set(StringList(tags));
    }
    if let Some(is_active) = payload.is_active {
        product.is_active = Set(is_active);
    }
    if let Some(is_featured) = payload.is_featured {
        product.is_featured = Set(is_featured);
    }

    let product = product.update(db).await?;
    Ok(product)
}

pub async fn remove<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    let product = CatalogEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No product with {} id was found", id)))?;

    let product: catalog::ActiveModel = product.into();
    product.delete(db).await?;
    Ok(())
}

/// Adjusts stock by `quantity` (negative allowed), clamped at zero.
pub async fn update_stock<C: ConnectionTrait>(
    db: &C,
    id: i32,
    quantity: i32,
) -> Result<catalog::Model, ApiError> {
    let product = CatalogEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No product with {} id was found", id)))?;

    let new_quantity = (product.stock_quantity + quantity).max(0);
    let mut product: catalog::ActiveModel = product.into();
    product.stock_quantity = Set(new_quantity);

    let product = product.update(db).await?;
    Ok(product)
}

pub async fn get_stats<C: ConnectionTrait>(db: &C) -> Result<CatalogStats, ApiError> {
    let products = CatalogEntity::find().all(db).await?;

    let total_products = products.len();
    let active_products = products.iter().filter(|p| p.is_active).count();
    let featured_products = products.iter().filter(|p| p.is_featured).count();
    let low_stock_products = products
        .iter()
        .filter(|p| p.stock_quantity <= p.min_stock_level && p.stock_quantity > 0)
        .count();
    let out_of_stock_products = products.iter().filter(|p| p.stock_quantity == 0).count();

    let total_margin: f32 = products
        .iter()
        .map(|p| {
            if p.base_price > 0.0 {
                (p.base_price - p.cost_price) / p.base_price * 100.0
            } else {
                0.0
            }
        })
        .sum();
    let avg_profit_margin = if products.is_empty() {
        0.0
    } else {
        total_margin / products.len() as f32
    };

    let total_inventory_value = products
        .iter()
        .map(|p| p.stock_quantity as f32 * p.cost_price)
        .sum();
    let total_retail_value = products
        .iter()
        .map(|p| p.stock_quantity as f32 * p.base_price)
        .sum();

    Ok(CatalogStats {
        total_products,
        active_products,
        featured_products,
        low_stock_products,
        out_of_stock_products,
        avg_profit_margin,
        total_inventory_value,
        total_retail_value,
    })
}

/// Lowercases the name, collapses non-alphanumeric runs to hyphens and trims
/// leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let collapsed = NON_SLUG_RE.replace_all(&lowered, "-");
    collapsed.trim_matches('-').to_string()
}

// No locking here: two concurrent creations with the same name can race to
// the same candidate, in which case the unique index rejects the loser.
async fn unique_slug<C: ConnectionTrait>(db: &C, name: &str) -> Result<String, ApiError> {
    let base_slug = slugify(name);

    let mut slug = base_slug.clone();
    let mut counter = 1;
    loop {
        let existing = CatalogEntity::find()
            .filter(catalog::Column::Slug.eq(slug.clone()))
            .one(db)
            .await?;
        if existing.is_none() {
            return Ok(slug);
        }
        slug = format!("{}-{}", base_slug, counter);
        counter += 1;
    }
}

/// Allocates the next free SKU: max numeric suffix over existing `MCB-NNN`
/// values, plus one, zero-padded to three digits.
async fn next_sku<C: ConnectionTrait>(db: &C) -> Result<String, ApiError> {
    let products = CatalogEntity::find().all(db).await?;

    let max = products
        .iter()
        .filter_map(|p| SKU_RE.captures(&p.sku))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    Ok(format!("MCB-{:03}", max + 1))
}

//Structs
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateCatalogItem {
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub base_price: f32,
    pub cost_price: f32,
    pub sku: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
    pub dimensions: Dimensions,
    pub weight: f32,
    pub stock_quantity: i32,
    pub min_stock_level: i32,
    pub image_urls: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PatchCatalogItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub category_id: Option<i32>,
    pub base_price: Option<f32>,
    pub cost_price: Option<f32>,
    pub sku: Option<String>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub materials: Option<Vec<String>>,
    pub dimensions: Option<Dimensions>,
    pub weight: Option<f32>,
    pub stock_quantity: Option<i32>,
    pub min_stock_level: Option<i32>,
    pub image_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct CatalogStats {
    pub total_products: usize,
    pub active_products: usize,
    pub featured_products: usize,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    pub avg_profit_margin: f32,
    pub total_inventory_value: f32,
    pub total_retail_value: f32,
}
