use super::auth_context;
use crate::models::*;
use crate::services::{RestaurantService, TeamService};
use async_graphql::{ComplexObject, Context, Object, Result, ResultExt};

#[derive(Default)]
pub struct TeamQuery;

#[Object]
impl TeamQuery {
    /// Grouped by job type: managers, chefs, waiters.
    async fn restaurant_team(
        &self,
        ctx: &Context<'_>,
        restaurant_id: i32,
    ) -> Result<Vec<TeamMember>> {
        let service = ctx.data::<TeamService>()?;
        let rows = service.list_by_restaurant(restaurant_id).await.extend()?;
        Ok(rows.into_iter().map(TeamMember::from).collect())
    }
}

#[derive(Default)]
pub struct TeamMutation;

#[Object]
impl TeamMutation {
    async fn create_restaurant_team(
        &self,
        ctx: &Context<'_>,
        input: CreateTeamMemberInput,
    ) -> Result<TeamMember> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let service = ctx.data::<TeamService>()?;
        service
            .require_manager(user, input.restaurant_id)
            .await
            .extend()?;
        Ok(service.create(input).await.extend()?.into())
    }

    async fn delete_restaurant_team(&self, ctx: &Context<'_>, uuid: String) -> Result<bool> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let service = ctx.data::<TeamService>()?;
        let Some(member) = service.find_by_uuid(&uuid).await.extend()? else {
            return Ok(false);
        };
        service
            .require_manager(user, member.restaurant_id)
            .await
            .extend()?;
        service.delete(&uuid).await.extend()
    }
}

#[ComplexObject]
impl TeamMember {
    async fn restaurant(&self, ctx: &Context<'_>) -> Result<Option<Restaurant>> {
        let service = ctx.data::<RestaurantService>()?;
        Ok(service.get(self.restaurant_id).await.extend()?.map(Restaurant::from))
    }
}
