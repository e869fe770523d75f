use crate::entities::invoice_entity as invoices;
use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Invoice {
    pub id: i32,
    /// Total in cents.
    pub total: i64,
    pub restaurant_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<invoices::Model> for Invoice {
    fn from(m: invoices::Model) -> Self {
        Self {
            id: m.id,
            total: m.total,
            restaurant_id: m.restaurant_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateInvoiceInput {
    pub total: i64,
    pub restaurant_id: i32,
    /// Orders to attach to the new invoice.
    pub order_ids: Vec<i32>,
}
