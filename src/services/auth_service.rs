use crate::error::{AppError, AppResult};
use crate::external::{AccountMetadata, CreateAccountRequest, IdentityProvider};
use crate::models::*;
use crate::services::{RestaurantService, TeamService};
use crate::utils::{normalize_email, validate_email, validate_password};
use std::sync::Arc;

// 经理及以上权限只能通过餐厅注册流程获得
const SELF_ASSIGNABLE_ROLES: [&str; 3] = ["user", "chef", "waiter"];

/// Account operations delegated to the identity provider.
#[derive(Clone)]
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Creates an already-confirmed account.
    pub async fn sign_up(&self, input: SignUpInput) -> AppResult<AuthPayload> {
        let email = normalize_email(&input.email);
        if let Err(e) = validate_email(&email).and_then(|_| validate_password(&input.password)) {
            return Ok(AuthPayload::failure(e.public_message()));
        }

        let role = match input.role.as_deref().map(|r| r.trim().to_ascii_lowercase()) {
            None => "user".to_string(),
            Some(role) if SELF_ASSIGNABLE_ROLES.contains(&role.as_str()) => role,
            Some(role) => {
                log::warn!("Rejected sign up for {email} with role '{role}'");
                return Ok(AuthPayload::failure(format!(
                    "Role '{role}' cannot be self-assigned"
                )));
            }
        };
        let request = CreateAccountRequest {
            email,
            password: input.password,
            email_confirmed: true,
            metadata: AccountMetadata {
                name: input.name,
                role: Some(role.clone()),
                ..Default::default()
            },
        };

        match self.identity.create_account(request).await {
            Ok(account) => Ok(AuthPayload {
                success: true,
                message: "User created successfully".to_string(),
                user: Some(AuthUser {
                    id: account.id,
                    email: account.email.unwrap_or_default(),
                    role,
                }),
                access_token: None,
                refresh_token: None,
            }),
            Err(e) => {
                log::error!("Sign up failed: {e}");
                Ok(AuthPayload::failure(format!(
                    "Sign up failed: {}",
                    provider_reason(&e)
                )))
            }
        }
    }

    pub async fn sign_in(&self, input: SignInInput) -> AppResult<AuthPayload> {
        let email = normalize_email(&input.email);
        match self.identity.sign_in(&email, &input.password).await {
            Ok(session) => {
                let role = session.account.role();
                Ok(AuthPayload {
                    success: true,
                    message: "Signed in successfully".to_string(),
                    user: Some(AuthUser {
                        id: session.account.id,
                        email: session.account.email.unwrap_or(email),
                        role,
                    }),
                    access_token: Some(session.access_token),
                    refresh_token: Some(session.refresh_token),
                })
            }
            Err(AppError::AuthError(msg)) => Ok(AuthPayload::failure(msg)),
            Err(e) => {
                log::error!("Sign in failed for {email}: {e}");
                Ok(AuthPayload::failure("Sign in failed"))
            }
        }
    }

    pub async fn sign_out(&self, auth: &AuthContext) -> AppResult<StatusPayload> {
        let user = auth.require_auth()?;
        let Some(token) = auth.token.as_deref() else {
            return Ok(StatusPayload::failure("Sign out failed: missing access token"));
        };

        match self.identity.sign_out(token).await {
            Ok(()) => {
                log::info!("User {} signed out", user.id);
                Ok(StatusPayload::ok("Signed out successfully"))
            }
            Err(e) => {
                log::error!("Sign out failed for {}: {e}", user.id);
                Ok(StatusPayload::failure(format!(
                    "Sign out failed: {}",
                    provider_reason(&e)
                )))
            }
        }
    }

    /// The caller's team membership and restaurant, matched on the provider id.
    pub async fn user_profile(
        &self,
        user: &AuthUser,
        team: &TeamService,
        restaurants: &RestaurantService,
    ) -> AppResult<UserProfile> {
        let member = team.find_by_uuid(&user.id).await?;
        let restaurant = match &member {
            Some(m) => restaurants.get(m.restaurant_id).await?,
            None => None,
        };

        Ok(UserProfile {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            team_member: member.map(Into::into),
            restaurant: restaurant.map(Into::into),
        })
    }
}

fn provider_reason(err: &AppError) -> String {
    match err {
        AppError::IdentityProviderError(msg) | AppError::AuthError(msg) => msg.clone(),
        _ => "identity service unavailable".to_string(),
    }
}
