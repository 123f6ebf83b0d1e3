//! Input validation helpers
//!
//! Length limits and field checks applied before customer forms and admin
//! payloads are sent to the backend.

use thiserror::Error;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, service, category, banner title, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, problem reports, review comments
pub const MAX_NOTE_LEN: usize = 2000;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: String },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong { field: String, len: usize, max: usize },

    #[error("{field} is invalid: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    if let Some(v) = value {
        validate_len(v, field, max_len)?;
    }
    Ok(())
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            len,
            max: max_len,
        });
    }
    Ok(())
}

/// Shape check only: one `@`, non-empty local part, dotted domain.
pub fn validate_email(value: &str, field: &str) -> Result<(), ValidationError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::invalid(field, "missing @"));
    };
    if local.is_empty() || domain.contains('@') || value.contains(char::is_whitespace) {
        return Err(ValidationError::invalid(field, "malformed address"));
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(ValidationError::invalid(field, "malformed domain"));
    }
    Ok(())
}

/// Vietnamese phone numbers: 9–11 digits after stripping spaces, dots and
/// dashes, optionally written with a leading `+84`.
pub fn validate_phone(value: &str, field: &str) -> Result<(), ValidationError> {
    validate_required_text(value, field, MAX_PHONE_LEN)?;
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid(field, "only digits allowed"));
    }
    if !(9..=11).contains(&digits.len()) {
        return Err(ValidationError::invalid(field, "expected 9 to 11 digits"));
    }
    Ok(())
}

/// Ratings are whole stars 1..=5
pub fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::invalid("rating", "must be between 1 and 5"));
    }
    Ok(())
}

/// Percentage discount 1..=100
pub fn validate_sale_off(sale_off: u8) -> Result<(), ValidationError> {
    if !(1..=100).contains(&sale_off) {
        return Err(ValidationError::invalid("sale_off", "must be between 1 and 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Nguyễn Văn A", "name", MAX_NAME_LEN).is_ok());
        assert_eq!(
            validate_required_text("  ", "name", MAX_NAME_LEN),
            Err(ValidationError::Empty { field: "name".into() })
        );
        // counts chars, not bytes
        assert!(validate_required_text("ệệệ", "name", 3).is_ok());
        assert!(validate_required_text("ệệệệ", "name", 3).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("khach@example.vn", "email").is_ok());
        assert!(validate_email("khach.example.vn", "email").is_err());
        assert!(validate_email("@example.vn", "email").is_err());
        assert!(validate_email("a@b", "email").is_err());
        assert!(validate_email("a@@b.vn", "email").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("0912 345 678", "phone").is_ok());
        assert!(validate_phone("+84912345678", "phone").is_ok());
        assert!(validate_phone("0912-abc-678", "phone").is_err());
        assert!(validate_phone("12345", "phone").is_err());
    }

    #[test]
    fn test_rating_and_sale_off() {
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_sale_off(100).is_ok());
        assert!(validate_sale_off(0).is_err());
        assert!(validate_sale_off(101).is_err());
    }
}
