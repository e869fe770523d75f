use super::{Restaurant, TeamMember};
use crate::error::{AppError, AppResult};
use async_graphql::{InputObject, SimpleObject};

/// Caller identity taken from a verified access token.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "User")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

/// Per-request authentication state, attached by the auth middleware.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user: Option<AuthUser>,
    pub token: Option<String>,
}

impl AuthContext {
    pub fn authenticated(user: AuthUser, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
        }
    }

    pub fn require_auth(&self) -> AppResult<&AuthUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, InputObject)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub success: bool,
    pub message: String,
    pub user: Option<AuthUser>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthPayload {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
            access_token: None,
            refresh_token: None,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: String,
    pub team_member: Option<TeamMember>,
    pub restaurant: Option<Restaurant>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct TeamMemberPayload {
    pub success: bool,
    pub message: String,
    pub team_member: Option<TeamMember>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CompleteInvitationPayload {
    pub success: bool,
    pub message: String,
    pub user: Option<AuthUser>,
}
