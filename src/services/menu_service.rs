use crate::entities::{
    category_entity as categories, item_entity as items, restaurant_entity as restaurants,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::validate_required;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// Categories and the items listed under them.
#[derive(Clone)]
pub struct MenuService {
    pool: DatabaseConnection,
}

impl MenuService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_categories(&self, restaurant_id: i32) -> AppResult<Vec<categories::Model>> {
        Ok(categories::Entity::find()
            .filter(categories::Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get_category(&self, id: i32) -> AppResult<Option<categories::Model>> {
        Ok(categories::Entity::find_by_id(id).one(&self.pool).await?)
    }

    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> AppResult<categories::Model> {
        validate_required("Category name", &input.name)?;

        let exists = restaurants::Entity::find_by_id(input.restaurant_id)
            .count(&self.pool)
            .await?
            > 0;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Restaurant with ID {} does not exist",
                input.restaurant_id
            )));
        }

        let model = categories::ActiveModel {
            name: Set(input.name.trim().to_string()),
            restaurant_id: Set(input.restaurant_id),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    pub async fn delete_category(&self, id: i32) -> AppResult<bool> {
        let result = categories::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_items(&self, category_id: i32) -> AppResult<Vec<items::Model>> {
        Ok(items::Entity::find()
            .filter(items::Column::CategoryId.eq(category_id))
            .order_by_asc(items::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get_item(&self, id: i32) -> AppResult<Option<items::Model>> {
        Ok(items::Entity::find_by_id(id).one(&self.pool).await?)
    }

    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<items::Model> {
        validate_required("Item name", &input.name)?;
        validate_price(input.price)?;

        let model = items::ActiveModel {
            name: Set(input.name.trim().to_string()),
            description: Set(input.description),
            image: Set(input.image),
            price: Set(input.price),
            category_id: Set(input.category_id),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    pub async fn update_item(&self, id: i32, input: UpdateItemInput) -> AppResult<items::Model> {
        let existing = self
            .get_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {id} not found")))?;

        let mut model = existing.into_active_model();
        if let Some(name) = input.name {
            validate_required("Item name", &name)?;
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        if let Some(image) = input.image {
            model.image = Set(image);
        }
        if let Some(price) = input.price {
            validate_price(price)?;
            model.price = Set(price);
        }

        Ok(model.update(&self.pool).await?)
    }

    pub async fn delete_item(&self, id: i32) -> AppResult<bool> {
        let result = items::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }
}

fn validate_price(price: i64) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::ValidationError(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(())
}
