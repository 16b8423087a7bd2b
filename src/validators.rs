use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Input validation utilities for photogram-service

// Compile regex patterns once at startup
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // This regex is hardcoded and validated - it is a compile-time constant in practice
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]{3,32}$")
        .expect("hardcoded username regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate username format (3-32 characters, alphanumeric with - and _)
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Build a "can't be blank" error for a field
pub fn blank_error() -> ValidationError {
    let mut err = ValidationError::new("blank");
    err.message = Some("can't be blank".into());
    err
}

/// Build an "is invalid" error for a field
pub fn invalid_error() -> ValidationError {
    let mut err = ValidationError::new("invalid");
    err.message = Some("is invalid".into());
    err
}

/// Build a "has already been taken" error for a field
pub fn taken_error() -> ValidationError {
    let mut err = ValidationError::new("taken");
    err.message = Some("has already been taken".into());
    err
}

/// Validate email presence and format into a shared error map.
/// `None` and blank both count as missing.
pub fn check_email(errors: &mut ValidationErrors, email: Option<&str>) {
    match email {
        None => errors.add("email", blank_error()),
        Some(value) if value.trim().is_empty() => errors.add("email", blank_error()),
        Some(value) if !validate_email(value) => errors.add("email", invalid_error()),
        Some(_) => {}
    }
}

/// Validate an optional username's shape when present.
pub fn check_username(errors: &mut ValidationErrors, username: Option<&str>) {
    if let Some(value) = username {
        if !value.is_empty() && !validate_username(value) {
            errors.add("username", invalid_error());
        }
    }
}

/// Validate a required non-blank text field.
pub fn check_presence(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    match value {
        None => errors.add(field, blank_error()),
        Some(v) if v.trim().is_empty() => errors.add(field, blank_error()),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!validate_email("invalid"));
        assert!(!validate_email("invalidemail.org"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
    }

    #[test]
    fn test_valid_username() {
        assert!(validate_username("john_doe"));
        assert!(validate_username("xmichael_scott"));
        assert!(validate_username("boris_99"));
    }

    #[test]
    fn test_invalid_username() {
        assert!(!validate_username("ab")); // Too short
        assert!(!validate_username(&"a".repeat(33))); // Too long
        assert!(!validate_username("user@name")); // Invalid character
    }

    #[test]
    fn missing_email_reports_blank() {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, None);
        let map = errors.field_errors();
        let messages: Vec<_> = map["email"]
            .iter()
            .map(|e| e.message.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(messages, vec!["can't be blank"]);
    }

    #[test]
    fn malformed_email_reports_invalid() {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, Some("invalidemail.org"));
        let map = errors.field_errors();
        let messages: Vec<_> = map["email"]
            .iter()
            .map(|e| e.message.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(messages, vec!["is invalid"]);
    }

    #[test]
    fn blank_caption_reports_blank() {
        let mut errors = ValidationErrors::new();
        check_presence(&mut errors, "caption", Some("   "));
        assert!(errors.field_errors().contains_key("caption"));
    }
}
