use crate::entities::{restaurant_entity as restaurants, rtable_entity as rtables};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::validate_required;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct RestaurantService {
    pool: DatabaseConnection,
}

impl RestaurantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<restaurants::Model>> {
        Ok(restaurants::Entity::find()
            .order_by_asc(restaurants::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<restaurants::Model>> {
        Ok(restaurants::Entity::find_by_id(id).one(&self.pool).await?)
    }

    /// 餐厅码不区分大小写
    pub async fn get_by_code(&self, code: &str) -> AppResult<Option<restaurants::Model>> {
        let code = code.trim().to_ascii_uppercase();
        Ok(restaurants::Entity::find()
            .filter(restaurants::Column::RestaurantCode.eq(code))
            .one(&self.pool)
            .await?)
    }

    pub async fn update(
        &self,
        id: i32,
        input: UpdateRestaurantInput,
    ) -> AppResult<restaurants::Model> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {id} not found")))?;

        let mut model = existing.into_active_model();
        if let Some(name) = input.name {
            validate_required("Restaurant name", &name)?;
            model.name = Set(name.trim().to_string());
        }
        if let Some(address) = input.address {
            validate_required("Address", &address)?;
            model.address = Set(address);
        }
        if let Some(phone) = input.phone {
            validate_required("Phone", &phone)?;
            model.phone = Set(phone);
        }
        model.updated_at = Set(Utc::now());

        Ok(model.update(&self.pool).await?)
    }

    /// 删除餐厅，外键级联删除其下所有数据
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = restaurants::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected > 0 {
            log::info!("Restaurant {id} deleted");
        }
        Ok(result.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct TableService {
    pool: DatabaseConnection,
}

impl TableService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<rtables::Model>> {
        Ok(rtables::Entity::find()
            .filter(rtables::Column::RestaurantId.eq(restaurant_id))
            .order_by_asc(rtables::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<rtables::Model>> {
        Ok(rtables::Entity::find_by_id(id).one(&self.pool).await?)
    }

    pub async fn create(&self, input: CreateRTableInput) -> AppResult<rtables::Model> {
        validate_required("Table name", &input.name)?;
        let model = rtables::ActiveModel {
            name: Set(input.name.trim().to_string()),
            restaurant_id: Set(input.restaurant_id),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = rtables::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }
}
