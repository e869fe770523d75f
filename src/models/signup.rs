use super::Restaurant;
use crate::entities::JobType;
use async_graphql::{InputObject, SimpleObject};

#[derive(Debug, Clone, InputObject)]
pub struct CreateRestaurantInput {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub manager_email: String,
    pub manager_name: String,
    pub manager_password: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateRestaurantPayload {
    pub success: bool,
    pub message: String,
    pub restaurant: Option<Restaurant>,
    pub restaurant_code: Option<String>,
    /// The identity provider accepted the manager account.
    pub account_created: bool,
    /// The verification code was handed to the dispatcher.
    pub email_sent: bool,
}

impl CreateRestaurantPayload {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            restaurant: None,
            restaurant_code: None,
            account_created: false,
            email_sent: false,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct VerifyEmailInput {
    pub email: String,
    pub verification_code: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct VerifyEmailPayload {
    pub success: bool,
    pub message: String,
    pub restaurant_code: Option<String>,
}

impl VerifyEmailPayload {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            restaurant_code: None,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct ResendVerificationCodeInput {
    pub email: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct ResendVerificationCodePayload {
    pub success: bool,
    pub message: String,
    pub email_sent: bool,
}

impl ResendVerificationCodePayload {
    pub fn no_pending() -> Self {
        Self {
            success: false,
            message: "No pending verification found for this email".to_string(),
            email_sent: false,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct JoinRestaurantInput {
    pub restaurant_code: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub job_type: JobType,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct JoinRestaurantPayload {
    pub success: bool,
    pub message: String,
    pub restaurant_name: Option<String>,
    pub account_created: bool,
    /// Always false: staff skip email verification.
    pub email_sent: bool,
}

impl JoinRestaurantPayload {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            restaurant_name: None,
            account_created: false,
            email_sent: false,
        }
    }
}
