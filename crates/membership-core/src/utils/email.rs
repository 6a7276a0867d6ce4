// Structural email check used before sending a viewer to the payment page.

/// Validate that a string looks like an email address.
///
/// Exactly one `@`, a non-empty local part, and a domain with a dot that is
/// neither leading nor trailing. Whitespace anywhere rejects the address.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user+tag@mail.example.co.uk"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("user name@example.com"));
    }
}
