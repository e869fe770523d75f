use crate::entities::{OrderItemState, order_entity as orders, order_item_entity as order_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 最新订单在前，可按餐桌过滤
    pub async fn list_orders(&self, table_id: Option<i32>) -> AppResult<Vec<orders::Model>> {
        let mut query = orders::Entity::find();
        if let Some(table_id) = table_id {
            query = query.filter(orders::Column::TableId.eq(table_id));
        }
        Ok(query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn list_orders_by_invoice(&self, invoice_id: i32) -> AppResult<Vec<orders::Model>> {
        Ok(orders::Entity::find()
            .filter(orders::Column::InvoiceId.eq(invoice_id))
            .order_by_asc(orders::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get_order(&self, id: i32) -> AppResult<Option<orders::Model>> {
        Ok(orders::Entity::find_by_id(id).one(&self.pool).await?)
    }

    pub async fn create_order(&self, input: CreateOrderInput) -> AppResult<orders::Model> {
        let model = orders::ActiveModel {
            table_id: Set(input.table_id),
            invoice_id: Set(None),
            ..Default::default()
        };
        let order = model.insert(&self.pool).await?;
        log::info!("Order {} opened for table {}", order.id, order.table_id);
        Ok(order)
    }

    pub async fn delete_order(&self, id: i32) -> AppResult<bool> {
        let result = orders::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_order_items(&self, order_id: i32) -> AppResult<Vec<order_items::Model>> {
        Ok(order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .order_by_asc(order_items::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn list_order_items_by_item(
        &self,
        item_id: i32,
    ) -> AppResult<Vec<order_items::Model>> {
        Ok(order_items::Entity::find()
            .filter(order_items::Column::ItemId.eq(item_id))
            .order_by_asc(order_items::Column::Id)
            .all(&self.pool)
            .await?)
    }

    /// 新订单项总是以待处理状态进入厨房队列
    pub async fn create_order_item(
        &self,
        input: CreateOrderItemInput,
    ) -> AppResult<order_items::Model> {
        if input.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }
        if input.price < 0 {
            return Err(AppError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }

        let model = order_items::ActiveModel {
            order_id: Set(input.order_id),
            item_id: Set(input.item_id),
            quantity: Set(input.quantity),
            price: Set(input.price),
            state: Set(OrderItemState::Pending),
            ..Default::default()
        };
        Ok(model.insert(&self.pool).await?)
    }

    pub async fn update_order_item_state(
        &self,
        input: UpdateOrderItemStateInput,
    ) -> AppResult<order_items::Model> {
        let existing = order_items::Entity::find_by_id(input.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order item {} not found", input.id)))?;

        let previous = existing.state;
        let mut model = existing.into_active_model();
        model.state = Set(input.state);
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.pool).await?;

        log::info!(
            "Order item {} moved from {:?} to {:?}",
            updated.id,
            previous,
            updated.state
        );
        Ok(updated)
    }

    pub async fn delete_order_item(&self, id: i32) -> AppResult<bool> {
        let result = order_items::Entity::delete_by_id(id).exec(&self.pool).await?;
        Ok(result.rows_affected > 0)
    }
}
