use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::category::{self, Entity as CategoryEntity};
use crate::entities::now_millis;
use crate::error::ApiError;

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>, ApiError> {
    let categories = CategoryEntity::find()
        .order_by_desc(category::Column::Id)
        .all(db)
        .await?;
    Ok(categories)
}

pub async fn list_active<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>, ApiError> {
    let categories = CategoryEntity::find()
        .filter(category::Column::IsActive.eq(true))
        .order_by_desc(category::Column::Id)
        .all(db)
        .await?;
    Ok(categories)
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    payload: CreateCategory,
) -> Result<category::Model, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let existing = CategoryEntity::find()
        .filter(category::Column::Name.eq(payload.name.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(
            "Category with this name already exists".to_string(),
        ));
    }

    let new_category = category::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        image_url: Set(payload.image_url),
        is_active: Set(true),
        created_at: Set(now_millis()),
        ..Default::default()
    };

    let category = new_category.insert(db).await?;
    Ok(category)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    payload: PatchCategory,
) -> Result<category::Model, ApiError> {
    let category = CategoryEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No category with {} id was found", id)))?;

    let mut category: category::ActiveModel = category.into();

    if let Some(name) = payload.name {
        category.name = Set(name);
    }
    if let Some(description) = payload.description {
        category.description = Set(description);
    }
    if let Some(image_url) = payload.image_url {
        category.image_url = Set(Some(image_url));
    }
    if let Some(is_active) = payload.is_active {
        category.is_active = Set(is_active);
    }

    let category = category.update(db).await?;
    Ok(category)
}

pub async fn remove<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
    let category = CategoryEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No category with {} id was found", id)))?;

    let category: category::ActiveModel = category.into();
    category.delete(db).await?;
    Ok(())
}

pub async fn get_stats<C: ConnectionTrait>(db: &C) -> Result<CategoryStats, ApiError> {
    let categories = CategoryEntity::find().all(db).await?;

    let total_categories = categories.len();
    let active_categories = categories.iter().filter(|c| c.is_active).count();

    Ok(CategoryStats {
        total_categories,
        active_categories,
        inactive_categories: total_categories - active_categories,
    })
}

//Structs
#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PatchCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Debug)]
pub struct CategoryStats {
    pub total_categories: usize,
    pub active_categories: usize,
    pub inactive_categories: usize,
}
