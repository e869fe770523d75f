use crate::models::*;
use crate::services::{InvoiceService, OrderService, RestaurantService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct InvoiceQuery;

#[Object]
impl InvoiceQuery {
    async fn invoices(&self, ctx: &Context<'_>, restaurant_id: i32) -> Result<Vec<Invoice>> {
        let service = ctx.data::<InvoiceService>()?;
        let rows = service.list_by_restaurant(restaurant_id).await.extend()?;
        Ok(rows.into_iter().map(Invoice::from).collect())
    }
}

#[derive(Default)]
pub struct InvoiceMutation;

#[Object]
impl InvoiceMutation {
    async fn create_invoice(
        &self,
        ctx: &Context<'_>,
        input: CreateInvoiceInput,
    ) -> Result<Invoice> {
        let service = ctx.data::<InvoiceService>()?;
        Ok(service.create(input).await.extend()?.into())
    }
}

#[ComplexObject]
impl Invoice {
    async fn restaurant(&self, ctx: &Context<'_>) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        Ok(service.get(self.restaurant_id).await.extend()?.map(Restaurant::from))
    }

    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_orders_by_invoice(self.id).await.extend()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }
}
