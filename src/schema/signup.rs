use crate::models::*;
use crate::services::SignupService;
use async_graphql::{Context, Object, Result, ResultExt};

/// Owner signup, email verification and staff join.
#[derive(Default)]
pub struct SignupMutation;

#[Object]
impl SignupMutation {
    async fn create_restaurant(
        &self,
        ctx: &Context<'_>,
        input: CreateRestaurantInput,
    ) -> Result<CreateRestaurantPayload> {
        let service = ctx.data::<SignupService>()?;
        service.create_restaurant(input).await.extend()
    }

    async fn verify_email(
        &self,
        ctx: &Context<'_>,
        input: VerifyEmailInput,
    ) -> Result<VerifyEmailPayload> {
        let service = ctx.data::<SignupService>()?;
        service.verify_email(input).await.extend()
    }

    async fn resend_verification_code(
        &self,
        ctx: &Context<'_>,
        input: ResendVerificationCodeInput,
    ) -> Result<ResendVerificationCodePayload> {
        let service = ctx.data::<SignupService>()?;
        service.resend_verification_code(input).await.extend()
    }

    async fn join_restaurant(
        &self,
        ctx: &Context<'_>,
        input: JoinRestaurantInput,
    ) -> Result<JoinRestaurantPayload> {
        let service = ctx.data::<SignupService>()?;
        service.join_restaurant(input).await.extend()
    }
}
