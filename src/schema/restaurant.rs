use super::auth_context;
use crate::models::*;
use crate::services::{InvoiceService, MenuService, RestaurantService, TableService, TeamService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct RestaurantQuery;

#[Object]
impl RestaurantQuery {
    async fn restaurants(&self, ctx: &Context<'_>) -> Result<Vec<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        let rows = service.list().await.extend()?;
        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    async fn restaurant(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        Ok(service.get(id).await.extend()?.map(Restaurant::from))
    }

    /// Looks a restaurant up by the code staff use to join it.
    async fn restaurant_by_code(
        &self,
        ctx: &Context<'_>,
        code: String,
    ) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        let row = service.get_by_code(&code).await.extend()?;
        Ok(row.map(Restaurant::from))
    }
}

#[derive(Default)]
pub struct RestaurantMutation;

#[Object]
impl RestaurantMutation {
    async fn update_restaurant(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateRestaurantInput,
    ) -> Result<Restaurant> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let team = ctx.data::<TeamService>()?;
        team.require_manager(user, id).await.extend()?;

        let service = ctx.data::<RestaurantService>()?;
        Ok(service.update(id, input).await.extend()?.into())
    }

    async fn delete_restaurant(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let team = ctx.data::<TeamService>()?;
        team.require_manager(user, id).await.extend()?;

        let service = ctx.data::<RestaurantService>()?;
        service.delete(id).await.extend()
    }
}

#[ComplexObject]
impl Restaurant {
    async fn invoices(&self, ctx: &Context<'_>) -> Result<Vec<Invoice>> {
        let service = ctx.data::<InvoiceService>()?;
        let rows = service.list_by_restaurant(self.id).await.extend()?;
        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    async fn rtables(&self, ctx: &Context<'_>) -> Result<Vec<RTable>> {
        let service = ctx.data::<TableService>()?;
        let rows = service.list_by_restaurant(self.id).await.extend()?;
        Ok(rows.into_iter().map(RTable::from).collect())
    }

    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let service = ctx.data::<MenuService>()?;
        let rows = service.list_categories(self.id).await.extend()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn restaurant_team(&self, ctx: &Context<'_>) -> Result<Vec<TeamMember>> {
        let service = ctx.data::<TeamService>()?;
        let rows = service.list_by_restaurant(self.id).await.extend()?;
        Ok(rows.into_iter().map(TeamMember::from).collect())
    }
}
