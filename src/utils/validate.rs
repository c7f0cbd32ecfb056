use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, VClassError};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("Invalid username regex"));

static ENROLLMENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,32}$").expect("Invalid enrollment id regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    // 3 <= 长度 <= 32，只能包含字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, numbers, underscores, dots or hyphens",
        );
    }
    Ok(())
}

pub fn validate_enrollment_id(enrollment_id: &str) -> std::result::Result<(), &'static str> {
    if !ENROLLMENT_ID_RE.is_match(enrollment_id) {
        return Err("Enrollment id must be 1-32 characters of letters, numbers or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 必填字段：去掉首尾空白后不能为空，返回去空白后的值
pub fn require_field(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VClassError::validation(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(trimmed.to_string())
}

/// 可选字段：空白视为未填写
pub fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("prof1").is_ok());
        assert!(validate_username("aluno_001").is_ok());
        assert!(validate_username("ana.silva-2").is_ok());
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_enrollment_id() {
        assert!(validate_enrollment_id("001").is_ok());
        assert!(validate_enrollment_id("2024-AB-17").is_ok());
        assert!(validate_enrollment_id("").is_err());
        assert!(validate_enrollment_id("12 34").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana@").is_err());
    }

    #[test]
    fn test_require_field_trims() {
        assert_eq!(require_field("  Ana ", "name").unwrap(), "Ana");
        let err = require_field("   ", "name").unwrap_err();
        assert!(matches!(err, VClassError::Validation(_)));
        assert!(err.message().contains("name"));
    }

    #[test]
    fn test_optional_field_drops_blank() {
        assert_eq!(optional_field(Some("  ".into())), None);
        assert_eq!(optional_field(Some(" BSc ".into())), Some("BSc".into()));
        assert_eq!(optional_field(None), None);
    }
}
