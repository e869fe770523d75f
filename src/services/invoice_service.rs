use crate::entities::{invoice_entity as invoices, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

#[derive(Clone)]
pub struct InvoiceService {
    pool: DatabaseConnection,
}

impl InvoiceService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<invoices::Model>> {
        Ok(invoices::Entity::find()
            .filter(invoices::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(invoices::Column::CreatedAt)
            .order_by_desc(invoices::Column::Id)
            .all(&self.pool)
            .await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<invoices::Model>> {
        Ok(invoices::Entity::find_by_id(id).one(&self.pool).await?)
    }

    /// Creates the invoice and attaches `order_ids` to it atomically.
    pub async fn create(&self, input: CreateInvoiceInput) -> AppResult<invoices::Model> {
        if input.total < 0 {
            return Err(AppError::ValidationError(
                "Invoice total cannot be negative".to_string(),
            ));
        }

        // 开始事务
        let txn = self.pool.begin().await?;

        let invoice = invoices::ActiveModel {
            total: Set(input.total),
            restaurant_id: Set(input.restaurant_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !input.order_ids.is_empty() {
            let result = orders::Entity::update_many()
                .col_expr(orders::Column::InvoiceId, Expr::value(invoice.id))
                .filter(orders::Column::Id.is_in(input.order_ids.clone()))
                .exec(&txn)
                .await?;

            if result.rows_affected != input.order_ids.len() as u64 {
                log::warn!(
                    "Invoice {}: {} of {} orders attached",
                    invoice.id,
                    result.rows_affected,
                    input.order_ids.len()
                );
            }
        }

        txn.commit().await?;

        log::info!(
            "Invoice {} created for restaurant {} (total {} cents)",
            invoice.id,
            invoice.restaurant_id,
            invoice.total
        );
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_create_invoice_attaches_orders_in_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![invoices::Model {
                id: 5,
                total: 4200,
                restaurant_id: 1,
                created_at: Utc::now(),
            }]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();
        let service = InvoiceService::new(db.clone());

        let invoice = service
            .create(CreateInvoiceInput {
                total: 4200,
                restaurant_id: 1,
                order_ids: vec![10, 11],
            })
            .await
            .unwrap();
        assert_eq!(invoice.id, 5);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1, "insert and update share one transaction");
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("INSERT INTO") && sql.contains("invoices"), "{sql}");
        assert!(sql.contains("UPDATE") && sql.contains("orders"), "{sql}");
    }

    #[tokio::test]
    async fn test_create_invoice_rejects_negative_total() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = InvoiceService::new(db);

        let err = service
            .create(CreateInvoiceInput {
                total: -1,
                restaurant_id: 1,
                order_ids: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
