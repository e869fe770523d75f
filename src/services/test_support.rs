//! In-memory doubles for the signup seams.

use crate::entities::{
    IdentitySource, JobType, restaurant_entity as restaurants, team_entity as team,
};
use crate::error::{AppError, AppResult};
use crate::external::{
    CreateAccountRequest, IdentityProvider, ProviderAccount, ProviderSession,
    VerificationDispatcher,
};
use crate::services::signup_store::{NewRestaurant, NewTeamMember, SignupStore};
use crate::utils::RestaurantCodeLookup;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryStore {
    restaurants: Mutex<Vec<restaurants::Model>>,
    members: Mutex<Vec<team::Model>>,
    writes: AtomicUsize,
    lookups: AtomicUsize,
    all_codes_taken: AtomicBool,
    verify_before_replace: AtomicBool,
}

impl MemoryStore {
    pub fn seed_restaurant(&self, name: &str, code: &str) -> restaurants::Model {
        let mut rows = self.restaurants.lock().unwrap();
        let model = restaurants::Model {
            id: rows.len() as i32 + 1,
            name: name.to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            restaurant_code: Some(code.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        rows.push(model.clone());
        model
    }

    pub fn seed_pending_manager(
        &self,
        uuid: &str,
        source: IdentitySource,
        email: &str,
        restaurant_id: i32,
        code: &str,
        expires_at: DateTime<Utc>,
    ) {
        self.members.lock().unwrap().push(team::Model {
            uuid: uuid.to_string(),
            identity_source: source,
            name: "Manager".to_string(),
            email: Some(email.to_string()),
            job_type: JobType::Manager,
            restaurant_id,
            is_active: false,
            email_verified: false,
            email_verification_code: Some(code.to_string()),
            code_expires_at: Some(expires_at),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
    }

    /// Every code lookup reports a collision from now on.
    pub fn saturate_codes(&self) {
        self.all_codes_taken.store(true, Ordering::SeqCst);
    }

    /// The next code replacement finds its member already verified.
    pub fn verify_before_next_replace(&self) {
        self.verify_before_replace.store(true, Ordering::SeqCst);
    }

    pub fn member(&self, uuid: &str) -> Option<team::Model> {
        self.members.lock().unwrap().iter().find(|m| m.uuid == uuid).cloned()
    }

    pub fn member_by_email(&self, email: &str) -> Option<team::Model> {
        self.members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.email.as_deref() == Some(email))
            .cloned()
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.lock().unwrap().len()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn code_lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RestaurantCodeLookup for MemoryStore {
    async fn restaurant_code_exists(&self, code: &str) -> AppResult<bool> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.all_codes_taken.load(Ordering::SeqCst) {
            return Ok(true);
        }
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.restaurant_code.as_deref() == Some(code)))
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> AppResult<restaurants::Model> {
        self.record_write();
        let mut rows = self.restaurants.lock().unwrap();
        let model = restaurants::Model {
            id: rows.len() as i32 + 1,
            name: restaurant.name,
            address: restaurant.address,
            phone: restaurant.phone,
            restaurant_code: Some(restaurant.restaurant_code),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        rows.push(model.clone());
        Ok(model)
    }

    async fn find_restaurant_by_id(&self, id: i32) -> AppResult<Option<restaurants::Model>> {
        Ok(self.restaurants.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_restaurant_by_code(&self, code: &str) -> AppResult<Option<restaurants::Model>> {
        Ok(self
            .restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.restaurant_code.as_deref() == Some(code))
            .cloned())
    }

    async fn insert_team_member(&self, member: NewTeamMember) -> AppResult<team::Model> {
        self.record_write();
        let (code, expires_at) = match member.verification_code {
            Some((code, expires_at)) => (Some(code), Some(expires_at)),
            None => (None, None),
        };
        let model = team::Model {
            uuid: member.identity.as_str().to_string(),
            identity_source: member.identity.source(),
            name: member.name,
            email: member.email,
            job_type: member.job_type,
            restaurant_id: member.restaurant_id,
            is_active: member.is_active,
            email_verified: member.email_verified,
            email_verification_code: code,
            code_expires_at: expires_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.members.lock().unwrap().push(model.clone());
        Ok(model)
    }

    async fn find_team_member_by_email(
        &self,
        restaurant_id: i32,
        email: &str,
    ) -> AppResult<Option<team::Model>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.restaurant_id == restaurant_id && m.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_pending_verification(
        &self,
        email: &str,
        code: &str,
    ) -> AppResult<Option<team::Model>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.email.as_deref() == Some(email)
                    && m.email_verification_code.as_deref() == Some(code)
                    && !m.email_verified
            })
            .cloned())
    }

    async fn find_pending_by_email(&self, email: &str) -> AppResult<Option<team::Model>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| {
                m.email.as_deref() == Some(email)
                    && !m.email_verified
                    && m.email_verification_code.is_some()
            })
            .cloned())
    }

    async fn mark_email_verified(&self, uuid: &str) -> AppResult<team::Model> {
        let mut members = self.members.lock().unwrap();
        let member = members
            .iter_mut()
            .find(|m| m.uuid == uuid && !m.email_verified)
            .ok_or(AppError::InvalidCode)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        member.email_verified = true;
        member.is_active = true;
        member.email_verification_code = None;
        member.code_expires_at = None;
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    async fn replace_verification_code(
        &self,
        uuid: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        self.record_write();
        let mut members = self.members.lock().unwrap();
        if self.verify_before_replace.swap(false, Ordering::SeqCst) {
            if let Some(member) = members.iter_mut().find(|m| m.uuid == uuid) {
                member.email_verified = true;
                member.email_verification_code = None;
                member.code_expires_at = None;
            }
        }
        let Some(member) = members
            .iter_mut()
            .find(|m| m.uuid == uuid && !m.email_verified)
        else {
            return Ok(false);
        };
        member.email_verification_code = Some(code.to_string());
        member.code_expires_at = Some(expires_at);
        Ok(true)
    }
}

/// Identity provider with switchable failures that records every call.
#[derive(Default)]
pub struct ScriptedIdentity {
    fail_create: bool,
    fail_confirm: bool,
    accounts: Mutex<Vec<(ProviderAccount, String)>>,
    created: Mutex<Vec<CreateAccountRequest>>,
    confirm_attempts: Mutex<Vec<String>>,
    confirmed: Mutex<Vec<String>>,
    signed_out: Mutex<Vec<String>>,
}

impl ScriptedIdentity {
    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Default::default()
        }
    }

    pub fn failing_confirm() -> Self {
        Self {
            fail_confirm: true,
            ..Default::default()
        }
    }

    pub fn register_account(&self, id: &str, email: &str) {
        self.register_account_with_password(id, email, "secret123", None);
    }

    pub fn register_account_with_password(
        &self,
        id: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) {
        let mut account = ProviderAccount {
            id: id.to_string(),
            email: Some(email.to_string()),
            user_metadata: Default::default(),
        };
        account.user_metadata.role = role.map(str::to_string);
        self.accounts
            .lock()
            .unwrap()
            .push((account, password.to_string()));
    }

    pub fn created(&self) -> Vec<CreateAccountRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn confirm_attempts(&self) -> Vec<String> {
        self.confirm_attempts.lock().unwrap().clone()
    }

    pub fn confirmed(&self) -> Vec<String> {
        self.confirmed.lock().unwrap().clone()
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn create_account(&self, request: CreateAccountRequest) -> AppResult<ProviderAccount> {
        if self.fail_create {
            return Err(AppError::IdentityProviderError(
                "Create account failed: HTTP 503: unavailable".to_string(),
            ));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = ProviderAccount {
            id: format!("acct-{}", accounts.len() + 1),
            email: Some(request.email.clone()),
            user_metadata: request.metadata.clone(),
        };
        accounts.push((account.clone(), request.password.clone()));
        self.created.lock().unwrap().push(request);
        Ok(account)
    }

    async fn confirm_account(&self, account_id: &str) -> AppResult<()> {
        self.confirm_attempts
            .lock()
            .unwrap()
            .push(account_id.to_string());
        if self.fail_confirm {
            return Err(AppError::IdentityProviderError(
                "Confirm account failed: HTTP 500".to_string(),
            ));
        }
        self.confirmed.lock().unwrap().push(account_id.to_string());
        Ok(())
    }

    async fn list_accounts_by_email(&self, email: &str) -> AppResult<Vec<ProviderAccount>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| a.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
            .map(|(a, _)| a.clone())
            .collect())
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<ProviderSession> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(a, p)| a.email.as_deref() == Some(email) && p == password)
            .map(|(a, _)| ProviderSession {
                account: a.clone(),
                access_token: format!("access-{}", a.id),
                refresh_token: format!("refresh-{}", a.id),
            })
            .ok_or_else(|| {
                AppError::AuthError("Sign in failed: Invalid login credentials".to_string())
            })
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }
}

/// Dispatcher that keeps `(email, code)` pairs instead of sending them.
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingDispatcher {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationDispatcher for RecordingDispatcher {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}
