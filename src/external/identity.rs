use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata stored alongside a provider account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    /// Mark the email as already confirmed (staff accounts).
    pub email_confirmed: bool,
    pub metadata: AccountMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderAccount {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: AccountMetadata,
}

impl ProviderAccount {
    pub fn role(&self) -> String {
        self.user_metadata
            .role
            .clone()
            .unwrap_or_else(|| "user".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub account: ProviderAccount,
    pub access_token: String,
    pub refresh_token: String,
}

/// External authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, request: CreateAccountRequest) -> AppResult<ProviderAccount>;

    async fn confirm_account(&self, account_id: &str) -> AppResult<()>;

    async fn list_accounts_by_email(&self, email: &str) -> AppResult<Vec<ProviderAccount>>;

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession>;

    /// Revokes the sessions behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}
