use super::identity::{
    AccountMetadata, CreateAccountRequest, IdentityProvider, ProviderAccount, ProviderSession,
};
use crate::config::IdentityConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LIST_PAGE_SIZE: usize = 200;
const LIST_MAX_PAGES: u32 = 50;

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: &'a AccountMetadata,
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
    #[serde(default)]
    users: Vec<ProviderAccount>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: ProviderAccount,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Admin client for a Supabase (GoTrue) auth server.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: Client,
    config: IdentityConfig,
}

impl SupabaseAuthClient {
    pub fn new(config: IdentityConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("tabletop-backend/identity")
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Service-role credentials for the admin API.
    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }

    async fn expect_success(response: Response, action: &str) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::IdentityProviderError(format!(
            "{action} failed: HTTP {status}: {}",
            error_message(&body)
        )))
    }
}

/// Pulls the human-readable part out of a GoTrue error body.
fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    async fn create_account(&self, request: CreateAccountRequest) -> AppResult<ProviderAccount> {
        let body = CreateUserBody {
            email: &request.email,
            password: &request.password,
            email_confirm: request.email_confirmed,
            user_metadata: &request.metadata,
        };
        let response = self
            .admin(self.http.post(self.endpoint("/admin/users")))
            .json(&body)
            .send()
            .await?;
        let response = Self::expect_success(response, "Create account").await?;
        let account: ProviderAccount = response.json().await?;
        log::info!("Identity account created: {} ({})", request.email, account.id);
        Ok(account)
    }

    async fn confirm_account(&self, account_id: &str) -> AppResult<()> {
        let response = self
            .admin(
                self.http
                    .put(self.endpoint(&format!("/admin/users/{account_id}"))),
            )
            .json(&serde_json::json!({ "email_confirm": true }))
            .send()
            .await?;
        Self::expect_success(response, "Confirm account").await?;
        Ok(())
    }

    async fn list_accounts_by_email(&self, email: &str) -> AppResult<Vec<ProviderAccount>> {
        let mut matches = Vec::new();
        for page in 1..=LIST_MAX_PAGES {
            let response = self
                .admin(self.http.get(self.endpoint("/admin/users")))
                .query(&[("page", page.to_string()), ("per_page", LIST_PAGE_SIZE.to_string())])
                .send()
                .await?;
            let response = Self::expect_success(response, "List accounts").await?;
            let body: ListUsersResponse = response.json().await?;
            let fetched = body.users.len();

            matches.extend(body.users.into_iter().filter(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.eq_ignore_ascii_case(email))
            }));

            if fetched < LIST_PAGE_SIZE {
                break;
            }
        }
        Ok(matches)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession> {
        let response = self
            .http
            .post(self.endpoint("/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if response.status().is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthError(format!(
                "Sign in failed: {}",
                error_message(&body)
            )));
        }
        let response = Self::expect_success(response, "Sign in").await?;
        let token: TokenResponse = response.json().await?;
        Ok(ProviderSession {
            account: token.user,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.endpoint("/logout"))
            .query(&[("scope", "global")])
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::expect_success(response, "Sign out").await?;
        Ok(())
    }
}
