use crate::entities::{JobType, team_entity as team};
use crate::error::{AppError, AppResult};
use crate::external::{
    AccountMetadata, CreateAccountRequest, IdentityProvider, VerificationDispatcher,
};
use crate::models::*;
use crate::services::signup_store::{NewRestaurant, NewTeamMember, SignupStore};
use crate::utils::{
    generate_email_verification_code, generate_unique_restaurant_code, normalize_email,
    validate_email, validate_password, validate_required,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Owner signup, email verification and staff join.
///
/// Identity-provider failures never abort a flow: they are logged, reflected
/// in the payload flags, and the member is stored under a placeholder
/// identity. Business-rule failures come back as `success: false` payloads;
/// storage errors and code-space exhaustion propagate.
#[derive(Clone)]
pub struct SignupService {
    store: Arc<dyn SignupStore>,
    identity: Arc<dyn IdentityProvider>,
    dispatcher: Arc<dyn VerificationDispatcher>,
    code_ttl: Duration,
}

impl SignupService {
    pub fn new(
        store: Arc<dyn SignupStore>,
        identity: Arc<dyn IdentityProvider>,
        dispatcher: Arc<dyn VerificationDispatcher>,
        code_ttl_hours: i64,
    ) -> Self {
        Self {
            store,
            identity,
            dispatcher,
            code_ttl: Duration::hours(code_ttl_hours),
        }
    }

    /// Creates the restaurant and registers its manager.
    pub async fn create_restaurant(
        &self,
        input: CreateRestaurantInput,
    ) -> AppResult<CreateRestaurantPayload> {
        let manager_email = normalize_email(&input.manager_email);
        if let Err(e) = validate_restaurant_input(&input, &manager_email) {
            return recover(e, CreateRestaurantPayload::failure);
        }

        let restaurant_code = generate_unique_restaurant_code(self.store.as_ref()).await?;
        let (verification_code, code_expires_at) = self.issue_code();

        let restaurant = self
            .store
            .insert_restaurant(NewRestaurant {
                name: input.name.trim().to_string(),
                address: input.address,
                phone: input.phone,
                restaurant_code: restaurant_code.clone(),
            })
            .await?;

        let identity = self
            .create_account_or_placeholder(CreateAccountRequest {
                email: manager_email.clone(),
                password: input.manager_password,
                email_confirmed: false,
                metadata: AccountMetadata {
                    name: Some(input.manager_name.clone()),
                    role: Some(JobType::Manager.to_string()),
                    restaurant_id: Some(restaurant.id.to_string()),
                    restaurant_code: Some(restaurant_code.clone()),
                },
            })
            .await;
        let account_created = matches!(identity, MemberIdentity::ProviderIssued(_));

        // 身份服务失败不回滚餐厅记录
        self.store
            .insert_team_member(NewTeamMember::pending_manager(
                identity,
                input.manager_name,
                manager_email.clone(),
                restaurant.id,
                verification_code.clone(),
                code_expires_at,
            ))
            .await?;

        let email_sent = self
            .dispatch_code(&manager_email, &verification_code, code_expires_at)
            .await;

        let message = if account_created && email_sent {
            format!(
                "Restaurant created successfully! Restaurant Code: {restaurant_code}. Verification code sent to {manager_email}"
            )
        } else {
            log::warn!(
                "Restaurant {} created with partial success (account_created={}, email_sent={})",
                restaurant.id,
                account_created,
                email_sent
            );
            format!(
                "Restaurant created successfully! Restaurant Code: {restaurant_code}. Please check account creation."
            )
        };

        Ok(CreateRestaurantPayload {
            success: true,
            message,
            restaurant: Some(restaurant.into()),
            restaurant_code: Some(restaurant_code),
            account_created,
            email_sent,
        })
    }

    /// Checks the emailed code and activates the manager.
    pub async fn verify_email(&self, input: VerifyEmailInput) -> AppResult<VerifyEmailPayload> {
        let email = normalize_email(&input.email);
        let member = match self
            .verify_code(&email, input.verification_code.trim(), Utc::now())
            .await
        {
            Ok(member) => member,
            Err(e) => return recover(e, VerifyEmailPayload::failure),
        };

        self.confirm_provider_account(&member, &email).await;

        let restaurant_code = self
            .store
            .find_restaurant_by_id(member.restaurant_id)
            .await?
            .and_then(|r| r.restaurant_code);

        Ok(VerifyEmailPayload {
            success: true,
            message: "Email verified successfully! You can now access your restaurant dashboard."
                .to_string(),
            restaurant_code,
        })
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<team::Model> {
        let member = self
            .store
            .find_pending_verification(email, code)
            .await?
            .ok_or(AppError::InvalidCode)?;

        if member.code_expires_at.is_some_and(|expires_at| expires_at < now) {
            return Err(AppError::ExpiredCode);
        }

        self.store.mark_email_verified(&member.uuid).await
    }

    /// Best effort: verification already succeeded locally.
    async fn confirm_provider_account(&self, member: &team::Model, email: &str) {
        let identity = MemberIdentity::from_record(&member.uuid, member.identity_source);
        let account_id = match identity.provider_id() {
            Some(id) => Some(id.to_string()),
            None => match self.identity.list_accounts_by_email(email).await {
                Ok(accounts) => accounts.into_iter().next().map(|a| a.id),
                Err(e) => {
                    log::error!("Failed to look up identity account for {email}: {e}");
                    return;
                }
            },
        };

        let Some(account_id) = account_id else {
            log::warn!("No identity account found for {email}; email confirmed locally only");
            return;
        };

        match self.identity.confirm_account(&account_id).await {
            Ok(()) => log::info!("Email confirmed at identity provider for {email}"),
            Err(e) => log::error!("Failed to confirm email at identity provider for {email}: {e}"),
        }
    }

    /// Issues a fresh code; the previous one stops working immediately.
    pub async fn resend_verification_code(
        &self,
        input: ResendVerificationCodeInput,
    ) -> AppResult<ResendVerificationCodePayload> {
        let email = normalize_email(&input.email);
        let Some(member) = self.store.find_pending_by_email(&email).await? else {
            return Ok(ResendVerificationCodePayload::no_pending());
        };

        let (code, expires_at) = self.issue_code();
        let replaced = self
            .store
            .replace_verification_code(&member.uuid, &code, expires_at)
            .await?;
        if !replaced {
            // 查询与更新之间已完成验证
            return Ok(ResendVerificationCodePayload::no_pending());
        }
        let email_sent = self.dispatch_code(&email, &code, expires_at).await;

        Ok(ResendVerificationCodePayload {
            success: true,
            message: if email_sent {
                format!("A new verification code was sent to {email}")
            } else {
                "A new verification code was issued but could not be sent. Please try again."
                    .to_string()
            },
            email_sent,
        })
    }

    /// Staff signup through a restaurant code.
    pub async fn join_restaurant(
        &self,
        input: JoinRestaurantInput,
    ) -> AppResult<JoinRestaurantPayload> {
        let email = normalize_email(&input.email);
        if let Err(e) = validate_join_input(&input, &email) {
            return recover(e, JoinRestaurantPayload::failure);
        }

        let code = input.restaurant_code.trim().to_ascii_uppercase();
        let Some(restaurant) = self.store.find_restaurant_by_code(&code).await? else {
            return Ok(JoinRestaurantPayload::failure("Invalid restaurant code"));
        };

        if self
            .store
            .find_team_member_by_email(restaurant.id, &email)
            .await?
            .is_some()
        {
            return Ok(JoinRestaurantPayload::failure(
                "Email is already registered for this restaurant",
            ));
        }

        let identity = self
            .create_account_or_placeholder(CreateAccountRequest {
                email: email.clone(),
                password: input.password,
                email_confirmed: true,
                metadata: AccountMetadata {
                    name: Some(input.name.clone()),
                    role: Some(input.job_type.to_string()),
                    restaurant_id: Some(restaurant.id.to_string()),
                    restaurant_code: restaurant.restaurant_code.clone(),
                },
            })
            .await;
        let account_created = matches!(identity, MemberIdentity::ProviderIssued(_));

        let member = self
            .store
            .insert_team_member(NewTeamMember::active_staff(
                identity,
                input.name,
                email,
                input.job_type,
                restaurant.id,
            ))
            .await?;
        log::info!(
            "Team member {} joined restaurant {} as {}",
            member.uuid,
            restaurant.id,
            member.job_type
        );

        let message = if account_created {
            format!(
                "Successfully joined {}! You can now sign in immediately.",
                restaurant.name
            )
        } else {
            format!(
                "Successfully joined {}! Please check account creation.",
                restaurant.name
            )
        };

        Ok(JoinRestaurantPayload {
            success: true,
            message,
            restaurant_name: Some(restaurant.name),
            account_created,
            email_sent: false,
        })
    }

    async fn create_account_or_placeholder(&self, request: CreateAccountRequest) -> MemberIdentity {
        let email = request.email.clone();
        match self.identity.create_account(request).await {
            Ok(account) => MemberIdentity::ProviderIssued(account.id),
            Err(e) => {
                let placeholder = MemberIdentity::synthesize();
                log::error!(
                    "Failed to create identity account for {}: {}; using placeholder {}",
                    email,
                    e,
                    placeholder.as_str()
                );
                placeholder
            }
        }
    }

    async fn dispatch_code(&self, email: &str, code: &str, expires_at: DateTime<Utc>) -> bool {
        match self
            .dispatcher
            .send_verification_code(email, code, expires_at)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to send verification code to {email}: {e}");
                false
            }
        }
    }

    fn issue_code(&self) -> (String, DateTime<Utc>) {
        (generate_email_verification_code(), Utc::now() + self.code_ttl)
    }
}

fn validate_restaurant_input(input: &CreateRestaurantInput, manager_email: &str) -> AppResult<()> {
    validate_required("Restaurant name", &input.name)?;
    validate_required("Address", &input.address)?;
    validate_required("Phone", &input.phone)?;
    validate_required("Manager name", &input.manager_name)?;
    validate_email(manager_email)?;
    validate_password(&input.manager_password)
}

fn validate_join_input(input: &JoinRestaurantInput, email: &str) -> AppResult<()> {
    validate_required("Restaurant code", &input.restaurant_code)?;
    validate_required("Name", &input.name)?;
    validate_email(email)?;
    validate_password(&input.password)?;
    if input.job_type == JobType::Manager {
        return Err(AppError::ValidationError(
            "Managers are registered when the restaurant is created".to_string(),
        ));
    }
    Ok(())
}

/// Turns business-rule failures into a `success: false` payload and lets
/// infrastructure errors through.
fn recover<T>(err: AppError, failure: impl FnOnce(String) -> T) -> AppResult<T> {
    match err {
        AppError::ValidationError(msg) | AppError::NotFound(msg) => Ok(failure(msg)),
        AppError::InvalidCode => Ok(failure("Invalid email or verification code".to_string())),
        AppError::ExpiredCode => Ok(failure(
            "Verification code has expired. Please request a new one.".to_string(),
        )),
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::IdentitySource;
    use crate::services::test_support::{MemoryStore, RecordingDispatcher, ScriptedIdentity};

    struct Harness {
        store: Arc<MemoryStore>,
        identity: Arc<ScriptedIdentity>,
        dispatcher: Arc<RecordingDispatcher>,
        service: SignupService,
    }

    fn harness(identity: ScriptedIdentity) -> Harness {
        let store = Arc::new(MemoryStore::default());
        let identity = Arc::new(identity);
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let service = SignupService::new(store.clone(), identity.clone(), dispatcher.clone(), 24);
        Harness {
            store,
            identity,
            dispatcher,
            service,
        }
    }

    fn owner_input() -> CreateRestaurantInput {
        CreateRestaurantInput {
            name: "Bistro Nova".into(),
            address: "1 Main St".into(),
            phone: "555-0100".into(),
            manager_email: "Ana@Bistro.com".into(),
            manager_name: "Ana".into(),
            manager_password: "secret123".into(),
        }
    }

    fn join_input(code: &str, email: &str) -> JoinRestaurantInput {
        JoinRestaurantInput {
            restaurant_code: code.into(),
            name: "Ben".into(),
            email: email.into(),
            password: "secret123".into(),
            job_type: JobType::Chef,
        }
    }

    fn verify_input(email: &str, code: &str) -> VerifyEmailInput {
        VerifyEmailInput {
            email: email.into(),
            verification_code: code.into(),
        }
    }

    #[tokio::test]
    async fn test_owner_signup_success() {
        let h = harness(ScriptedIdentity::default());
        let payload = h.service.create_restaurant(owner_input()).await.unwrap();

        assert!(payload.success);
        assert!(payload.account_created);
        assert!(payload.email_sent);
        let code = payload.restaurant_code.clone().unwrap();
        assert!(payload.message.contains(&code));
        assert!(payload.message.contains("Verification code sent to ana@bistro.com"));

        let manager = h.store.member_by_email("ana@bistro.com").unwrap();
        assert_eq!(manager.identity_source, IdentitySource::Provider);
        assert_eq!(manager.job_type, JobType::Manager);
        assert!(!manager.is_active);
        assert!(!manager.email_verified);
        let sent = h.dispatcher.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(Some(&sent[0].1), manager.email_verification_code.as_ref());

        let created = h.identity.created();
        assert_eq!(created.len(), 1);
        assert!(!created[0].email_confirmed);
        assert_eq!(created[0].metadata.role.as_deref(), Some("manager"));
        assert_eq!(created[0].metadata.restaurant_code.as_deref(), Some(code.as_str()));
    }

    #[tokio::test]
    async fn test_owner_signup_keeps_records_when_provider_fails() {
        let h = harness(ScriptedIdentity::failing_create());
        let payload = h.service.create_restaurant(owner_input()).await.unwrap();

        assert!(payload.success);
        assert!(!payload.account_created);
        assert!(payload.message.contains("Please check account creation."));

        assert_eq!(h.store.restaurant_count(), 1);
        let manager = h.store.member_by_email("ana@bistro.com").unwrap();
        assert_eq!(manager.identity_source, IdentitySource::Local);
        assert!(manager.uuid.starts_with("emp_"));
        assert!(manager.email_verification_code.is_some());
    }

    #[tokio::test]
    async fn test_owner_signup_rejects_invalid_input_without_writes() {
        let h = harness(ScriptedIdentity::default());
        let mut input = owner_input();
        input.manager_email = "not-an-email".into();

        let payload = h.service.create_restaurant(input).await.unwrap();
        assert!(!payload.success);
        assert_eq!(h.store.write_count(), 0);
        assert_eq!(h.store.code_lookups(), 0);
        assert!(h.identity.created().is_empty());
    }

    #[tokio::test]
    async fn test_owner_signup_fails_when_code_space_exhausted() {
        let h = harness(ScriptedIdentity::default());
        h.store.saturate_codes();
        let err = h.service.create_restaurant(owner_input()).await.unwrap_err();
        assert!(matches!(err, AppError::CodeSpaceExhausted { .. }));
        assert_eq!(h.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_verify_email_success() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );

        let payload = h
            .service
            .verify_email(verify_input("ana@bistro.com", "123456"))
            .await
            .unwrap();
        assert!(payload.success);
        assert_eq!(payload.restaurant_code.as_deref(), Some("AB12C34"));

        let member = h.store.member("mgr-1").unwrap();
        assert!(member.is_active);
        assert!(member.email_verified);
        assert!(member.email_verification_code.is_none());
        assert!(member.code_expires_at.is_none());
        assert_eq!(h.identity.confirmed(), vec!["mgr-1".to_string()]);
    }

    #[tokio::test]
    async fn test_verify_email_wrong_code_leaves_record() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );
        let before = h.store.member("mgr-1").unwrap();

        let payload = h
            .service
            .verify_email(verify_input("ana@bistro.com", "999999"))
            .await
            .unwrap();
        assert!(!payload.success);
        assert_eq!(payload.message, "Invalid email or verification code");
        assert_eq!(h.store.member("mgr-1").unwrap(), before);
        assert!(h.identity.confirmed().is_empty());
    }

    #[tokio::test]
    async fn test_verify_email_expired_code_leaves_record() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() - Duration::minutes(1),
        );
        let before = h.store.member("mgr-1").unwrap();

        let payload = h
            .service
            .verify_email(verify_input("ana@bistro.com", "123456"))
            .await
            .unwrap();
        assert!(!payload.success);
        assert!(payload.message.contains("expired"));
        assert_eq!(h.store.member("mgr-1").unwrap(), before);
    }

    #[tokio::test]
    async fn test_verify_code_expiry_boundary() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        let expires_at = Utc::now() + Duration::hours(1);
        for (uuid, email) in [("mgr-1", "ana@bistro.com"), ("mgr-2", "eve@bistro.com")] {
            h.store.seed_pending_manager(
                uuid,
                IdentitySource::Provider,
                email,
                restaurant.id,
                "123456",
                expires_at,
            );
        }

        // 到期时刻本身仍然有效
        let verified = h
            .service
            .verify_code("ana@bistro.com", "123456", expires_at)
            .await
            .unwrap();
        assert!(verified.email_verified);

        let err = h
            .service
            .verify_code("eve@bistro.com", "123456", expires_at + Duration::nanoseconds(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExpiredCode));
        assert!(!h.store.member("mgr-2").unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_verify_email_is_one_way() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );

        let first = h
            .service
            .verify_email(verify_input("ana@bistro.com", "123456"))
            .await
            .unwrap();
        let second = h
            .service
            .verify_email(verify_input("ana@bistro.com", "123456"))
            .await
            .unwrap();
        assert!(first.success);
        assert!(!second.success);
        assert!(h.store.member("mgr-1").unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_verify_email_resolves_placeholder_and_tolerates_confirm_failure() {
        let h = harness(ScriptedIdentity::failing_confirm());
        h.identity.register_account("real-id", "ana@bistro.com");
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "emp_1_abcdefghi",
            IdentitySource::Local,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );

        let payload = h
            .service
            .verify_email(verify_input("ana@bistro.com", "123456"))
            .await
            .unwrap();
        assert!(payload.success);
        assert_eq!(h.identity.confirm_attempts(), vec!["real-id".to_string()]);
        assert!(h.store.member("emp_1_abcdefghi").unwrap().email_verified);
    }

    #[tokio::test]
    async fn test_resend_supersedes_previous_code() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() - Duration::minutes(1),
        );

        let payload = h
            .service
            .resend_verification_code(ResendVerificationCodeInput {
                email: "ana@bistro.com".into(),
            })
            .await
            .unwrap();
        assert!(payload.success);
        assert!(payload.email_sent);

        let member = h.store.member("mgr-1").unwrap();
        let new_code = member.email_verification_code.clone().unwrap();
        assert!(member.code_expires_at.unwrap() > Utc::now());
        assert_eq!(
            h.dispatcher.sent().last().map(|s| s.1.clone()),
            Some(new_code.clone())
        );

        if new_code != "123456" {
            let stale = h
                .service
                .verify_email(verify_input("ana@bistro.com", "123456"))
                .await
                .unwrap();
            assert!(!stale.success);
        }
        let fresh = h
            .service
            .verify_email(verify_input("ana@bistro.com", &new_code))
            .await
            .unwrap();
        assert!(fresh.success);
    }

    #[tokio::test]
    async fn test_resend_after_concurrent_verification() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ana@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );
        h.store.verify_before_next_replace();

        let payload = h
            .service
            .resend_verification_code(ResendVerificationCodeInput {
                email: "ana@bistro.com".into(),
            })
            .await
            .unwrap();
        assert!(!payload.success);
        assert!(!payload.email_sent);
        assert_eq!(payload.message, "No pending verification found for this email");
        assert!(h.dispatcher.sent().is_empty());
        assert!(h.store.member("mgr-1").unwrap().email_verification_code.is_none());
    }

    #[tokio::test]
    async fn test_resend_without_pending_record() {
        let h = harness(ScriptedIdentity::default());
        let payload = h
            .service
            .resend_verification_code(ResendVerificationCodeInput {
                email: "nobody@bistro.com".into(),
            })
            .await
            .unwrap();
        assert!(!payload.success);
        assert!(h.dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_staff_join_success() {
        let h = harness(ScriptedIdentity::default());
        h.store.seed_restaurant("Bistro Nova", "AB12C34");

        let payload = h
            .service
            .join_restaurant(join_input("ab12c34", "ben@bistro.com"))
            .await
            .unwrap();
        assert!(payload.success);
        assert!(payload.account_created);
        assert!(!payload.email_sent);
        assert_eq!(payload.restaurant_name.as_deref(), Some("Bistro Nova"));
        assert!(payload.message.contains("sign in immediately"));

        let member = h.store.member_by_email("ben@bistro.com").unwrap();
        assert!(member.is_active);
        assert!(member.email_verified);
        assert!(member.email_verification_code.is_none());
        assert_eq!(member.job_type, JobType::Chef);
        assert!(h.identity.created()[0].email_confirmed);
        assert_eq!(h.identity.created()[0].metadata.role.as_deref(), Some("chef"));
        assert!(h.dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_staff_join_provider_failure_uses_placeholder() {
        let h = harness(ScriptedIdentity::failing_create());
        h.store.seed_restaurant("Bistro Nova", "AB12C34");

        let payload = h
            .service
            .join_restaurant(join_input("AB12C34", "ben@bistro.com"))
            .await
            .unwrap();
        assert!(payload.success);
        assert!(!payload.account_created);
        assert!(payload.message.contains("Please check account creation."));
        let member = h.store.member_by_email("ben@bistro.com").unwrap();
        assert_eq!(member.identity_source, IdentitySource::Local);
        assert!(member.uuid.starts_with("emp_"));
    }

    #[tokio::test]
    async fn test_staff_join_duplicate_email_performs_no_writes() {
        let h = harness(ScriptedIdentity::default());
        let restaurant = h.store.seed_restaurant("Bistro Nova", "AB12C34");
        h.store.seed_pending_manager(
            "mgr-1",
            IdentitySource::Provider,
            "ben@bistro.com",
            restaurant.id,
            "123456",
            Utc::now() + Duration::hours(1),
        );
        let writes = h.store.write_count();

        let payload = h
            .service
            .join_restaurant(join_input("AB12C34", "ben@bistro.com"))
            .await
            .unwrap();
        assert!(!payload.success);
        assert_eq!(payload.message, "Email is already registered for this restaurant");
        assert_eq!(h.store.write_count(), writes);
        assert!(h.identity.created().is_empty());
    }

    #[tokio::test]
    async fn test_staff_join_invalid_code() {
        let h = harness(ScriptedIdentity::default());
        let payload = h
            .service
            .join_restaurant(join_input("ZZ99Z99", "ben@bistro.com"))
            .await
            .unwrap();
        assert!(!payload.success);
        assert_eq!(payload.message, "Invalid restaurant code");
        assert_eq!(h.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_staff_join_rejects_manager_role() {
        let h = harness(ScriptedIdentity::default());
        h.store.seed_restaurant("Bistro Nova", "AB12C34");
        let mut input = join_input("AB12C34", "ben@bistro.com");
        input.job_type = JobType::Manager;

        let payload = h.service.join_restaurant(input).await.unwrap();
        assert!(!payload.success);
        assert!(h.identity.created().is_empty());
    }
}
