use crate::models::*;
use crate::services::{OrderService, RestaurantService, TableService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct TableQuery;

#[Object]
impl TableQuery {
    async fn rtables(&self, ctx: &Context<'_>, restaurant_id: i32) -> Result<Vec<RTable>> {
        let service = ctx.data::<TableService>()?;
        let rows = service.list_by_restaurant(restaurant_id).await.extend()?;
        Ok(rows.into_iter().map(RTable::from).collect())
    }
}

#[derive(Default)]
pub struct TableMutation;

#[Object]
impl TableMutation {
    #[graphql(name = "createRTable")]
    async fn create_rtable(&self, ctx: &Context<'_>, input: CreateRTableInput) -> Result<RTable> {
        let service = ctx.data::<TableService>()?;
        Ok(service.create(input).await.extend()?.into())
    }

    #[graphql(name = "deleteRTable")]
    async fn delete_rtable(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let service = ctx.data::<TableService>()?;
        service.delete(id).await.extend()
    }
}

#[ComplexObject]
impl RTable {
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let service = ctx.data::<OrderService>()?;
        let rows = service.list_orders(Some(self.id)).await.extend()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn restaurant(&self, ctx: &Context<'_>) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        Ok(service.get(self.restaurant_id).await.extend()?.map(Restaurant::from))
    }
}
