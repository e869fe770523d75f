use crate::models::*;
use crate::services::{InvoiceService, MenuService, OrderService, TableService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct OrderQuery;

#[Object]
impl OrderQuery {
    /// Newest first; optionally limited to one table.
    async fn orders(&self, ctx: &Context<'_>, table_id: Option<i32>) -> Result<Vec<Order>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_orders(table_id).await.extend()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn order(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Order>> {
        let service = ctx.data::<OrderService>()?;
        Ok(service.get_order(id).await.extend()?.map(Order::from))
    }

    async fn order_items(&self, ctx: &Context<'_>, order_id: i32) -> Result<Vec<OrderItem>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_order_items(order_id).await.extend()?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }
}

#[derive(Default)]
pub struct OrderMutation;

#[Object]
impl OrderMutation {
    async fn create_order(&self, ctx: &Context<'_>, input: CreateOrderInput) -> Result<Order> {
        let service = ctx.data::<OrderService>()?;
        Ok(service.create_order(input).await.extend()?.into())
    }

    async fn delete_order(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let service = ctx.data::<OrderService>()?;
        service.delete_order(id).await.extend()
    }

    async fn create_order_item(
        &self,
        ctx: &Context<'_>,
        input: CreateOrderItemInput,
    ) -> Result<OrderItem> {
        let service = ctx.data::<OrderService>()?;
        Ok(service.create_order_item(input).await.extend()?.into())
    }

    async fn update_order_item_state(
        &self,
        ctx: &Context<'_>,
        input: UpdateOrderItemStateInput,
    ) -> Result<OrderItem> {
        let service = ctx.data::<OrderService>()?;
        Ok(service.update_order_item_state(input).await.extend()?.into())
    }

    async fn delete_order_item(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let service = ctx.data::<OrderService>()?;
        service.delete_order_item(id).await.extend()
    }
}

#[ComplexObject]
impl Order {
    async fn order_items(&self, ctx: &Context<'_>) -> Result<Vec<OrderItem>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_order_items(self.id).await.extend()?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    async fn rtable(&self, ctx: &Context<'_>) -> Result<Option<RTable>> {
        let service = ctx.data::<TableService>()?;
        Ok(service.get(self.table_id).await.extend()?.map(RTable::from))
    }

    async fn invoice(&self, ctx: &Context<'_>) -> Result<Option<Invoice>> {
        let Some(invoice_id) = self.invoice_id else {
            return Ok(None);
        };
        let service = ctx.data::<InvoiceService>()?;
        Ok(service.get(invoice_id).await.extend()?.map(Invoice::from))
    }
}

#[ComplexObject]
impl OrderItem {
    async fn order(&self, ctx: &Context<'_>) -> Result<Option<Order>> {
        let service = ctx.data::<OrderService>()?;
        Ok(service.get_order(self.order_id).await.extend()?.map(Order::from))
    }

    async fn item(&self, ctx: &Context<'_>) -> Result<Option<Item>> {
        let service = ctx.data::<MenuService>()?;
        Ok(service.get_item(self.item_id).await.extend()?.map(Item::from))
    }
}
