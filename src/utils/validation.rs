use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// 验证邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::ValidationError(
            "Invalid email format provided".to_string(),
        ));
    }
    Ok(())
}

/// 身份服务商要求密码至少6位
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 6 || password.len() > 72 {
        return Err(AppError::ValidationError(
            "Password length must be between 6 and 72 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

/// 邮箱去空格并转小写，查询时不区分大小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@bistro.com").is_ok());
        assert!(validate_email("owner@bistro").is_err());
        assert!(validate_email("owner bistro@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("12345").is_err());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Bistro").is_ok());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Owner@Bistro.COM "), "owner@bistro.com");
    }
}
