use super::auth_context;
use crate::error::AppError;
use crate::models::*;
use crate::services::{AuthService, RestaurantService, TeamService};
use async_graphql::{Context, ErrorExtensions, Object, Result, ResultExt};

#[derive(Default)]
pub struct AuthQuery;

#[Object]
impl AuthQuery {
    async fn me(&self, ctx: &Context<'_>) -> Result<AuthUser> {
        let auth = auth_context(ctx);
        Ok(auth.require_auth().extend()?.clone())
    }

    async fn user_profile(&self, ctx: &Context<'_>) -> Result<UserProfile> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let service = ctx.data::<AuthService>()?;
        service
            .user_profile(
                user,
                ctx.data::<TeamService>()?,
                ctx.data::<RestaurantService>()?,
            )
            .await
            .extend()
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn sign_up(&self, ctx: &Context<'_>, input: SignUpInput) -> Result<AuthPayload> {
        let service = ctx.data::<AuthService>()?;
        service.sign_up(input).await.extend()
    }

    async fn sign_in(&self, ctx: &Context<'_>, input: SignInInput) -> Result<AuthPayload> {
        let service = ctx.data::<AuthService>()?;
        service.sign_in(input).await.extend()
    }

    async fn sign_out(&self, ctx: &Context<'_>) -> Result<StatusPayload> {
        let service = ctx.data::<AuthService>()?;
        service.sign_out(&auth_context(ctx)).await.extend()
    }

    /// Attaches the signed-in account to an existing team member.
    async fn link_user_to_team_member(
        &self,
        ctx: &Context<'_>,
        existing_uuid: String,
    ) -> Result<TeamMemberPayload> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let service = ctx.data::<TeamService>()?;

        match service.link_user_to_team_member(&existing_uuid, user).await {
            Ok(member) => Ok(TeamMemberPayload {
                success: true,
                message: "User linked to team member successfully".to_string(),
                team_member: Some(member.into()),
            }),
            Err(
                AppError::NotFound(msg) | AppError::ValidationError(msg) | AppError::Forbidden(msg),
            ) => Ok(TeamMemberPayload {
                success: false,
                message: msg,
                team_member: None,
            }),
            Err(e) => Err(e.extend()),
        }
    }

    /// Accepts an invitation: re-keys the invited member to the signed-in
    /// account and activates it.
    async fn complete_invitation(
        &self,
        ctx: &Context<'_>,
        temp_uuid: String,
    ) -> Result<CompleteInvitationPayload> {
        let auth = auth_context(ctx);
        let user = auth.require_auth().extend()?;
        let team = ctx.data::<TeamService>()?;
        let restaurants = ctx.data::<RestaurantService>()?;

        match team.complete_invitation(&temp_uuid, user).await {
            Ok(member) => {
                let restaurant = restaurants.get(member.restaurant_id).await.extend()?;
                let name = restaurant.map(|r| r.name).unwrap_or_default();
                Ok(CompleteInvitationPayload {
                    success: true,
                    message: format!("Welcome to {name}! Your account is now active."),
                    user: Some(user.clone()),
                })
            }
            Err(AppError::NotFound(_)) => Ok(CompleteInvitationPayload {
                success: false,
                message: "Invalid invitation link".to_string(),
                user: None,
            }),
            Err(AppError::ValidationError(msg) | AppError::Forbidden(msg)) => {
                Ok(CompleteInvitationPayload {
                    success: false,
                    message: msg,
                    user: None,
                })
            }
            Err(e) => Err(e.extend()),
        }
    }
}
