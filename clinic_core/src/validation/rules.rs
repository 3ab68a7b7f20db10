//! Custom `validator` rules

use validator::{ValidateEmail, ValidationError};

/// RFC-shaped address whose domain has at least one inner dot, so
/// `jo@localhost` style addresses are refused.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let dotted_domain = email
        .rsplit_once('@')
        .map(|(_, domain)| {
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if email.validate_email() && dotted_domain {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}
