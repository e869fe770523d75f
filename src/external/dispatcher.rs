use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Delivers email verification codes to managers.
#[async_trait]
pub trait VerificationDispatcher: Send + Sync {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Writes the code to the service log. Used until a mail provider is wired in.
#[derive(Clone, Default)]
pub struct LogDispatcher;

#[async_trait]
impl VerificationDispatcher for LogDispatcher {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        log::info!(
            "Email verification code for {}: {} (expires {})",
            email,
            code,
            expires_at.to_rfc3339()
        );
        Ok(())
    }
}
