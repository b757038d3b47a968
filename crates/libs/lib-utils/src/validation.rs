//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic check).
///
/// Requires a non-empty local part and a dot somewhere after the `@`.
pub fn validate_email(email: &str) -> Result<(), String> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate minimum length.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.len() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Ana", "name").is_ok());
        assert!(validate_not_empty("", "name").is_err());
        assert!(validate_not_empty("   ", "name").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@ipvc.pt").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@ipvc.pt").is_err());
        assert!(validate_email("ana@nodot").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_min_length() {
        assert!(validate_min_length("1234", 4, "password").is_ok());
        assert!(validate_min_length("123", 4, "password").is_err());
    }
}
