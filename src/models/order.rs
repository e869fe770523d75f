use crate::entities::{OrderItemState, order_entity as orders, order_item_entity as order_items};
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Order {
    pub id: i32,
    pub table_id: i32,
    pub invoice_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(m: orders::Model) -> Self {
        Self {
            id: m.id,
            table_id: m.table_id,
            invoice_id: m.invoice_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateOrderInput {
    pub table_id: i32,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    /// Unit price in cents at the time of ordering.
    pub price: i64,
    pub state: OrderItemState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<order_items::Model> for OrderItem {
    fn from(m: order_items::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            item_id: m.item_id,
            quantity: m.quantity,
            price: m.price,
            state: m.state,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateOrderItemInput {
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub price: i64,
}

#[derive(Debug, Clone, InputObject)]
pub struct UpdateOrderItemStateInput {
    pub id: i32,
    pub state: OrderItemState,
}
