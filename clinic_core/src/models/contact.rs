use crate::validation::{
    validate_email_address, FieldReader, FromPayload, Validatable, ValidationReport,
};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

/// A visitor inquiry, written to the `contactmessage` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub const COLLECTION: &'static str = "contactmessage";
}

#[derive(Debug, Default, Validate)]
struct ContactMessageInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: Option<String>,

    #[validate(custom(function = "validate_email_address", message = "Invalid email format"))]
    email: Option<String>,

    #[validate(length(min = 5, max = 1000, message = "Message must be between 5 and 1000 characters"))]
    message: Option<String>,
}

impl FromPayload for ContactMessage {
    fn from_payload(payload: Value) -> Result<Self, ValidationReport> {
        let mut reader = FieldReader::new(&payload)?;

        let input = ContactMessageInput {
            name: reader.required_text("name"),
            email: reader.required_text("email"),
            message: reader.required_text("message"),
        };

        let mut report = reader.finish();
        report.merge(input.validate_report());

        let ContactMessageInput {
            name: Some(name),
            email: Some(email),
            message: Some(message),
        } = input
        else {
            return Err(report);
        };

        report.into_result(ContactMessage {
            name,
            email,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;
    use serde_json::json;

    fn payload_with_message(message: &str) -> Value {
        json!({ "name": "Sam", "email": "sam@example.com", "message": message })
    }

    #[test]
    fn test_message_length_boundaries() {
        assert!(ContactMessage::from_payload(payload_with_message(&"a".repeat(5))).is_ok());
        assert!(ContactMessage::from_payload(payload_with_message(&"a".repeat(1000))).is_ok());

        for length in [0, 4, 1001] {
            let report =
                ContactMessage::from_payload(payload_with_message(&"a".repeat(length))).unwrap_err();
            assert!(report.has_violation("message", ViolationKind::Length));
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // five characters, seven bytes
        assert!(ContactMessage::from_payload(payload_with_message("ñandú")).is_ok());
        assert!(ContactMessage::from_payload(payload_with_message(&"é".repeat(1000))).is_ok());
    }

    #[test]
    fn test_malformed_email() {
        let payload = json!({ "name": "Sam", "email": "not-an-email", "message": "Hello there" });
        let report = ContactMessage::from_payload(payload).unwrap_err();
        assert_eq!(report.violations().len(), 1);
        assert!(report.has_violation("email", ViolationKind::Email));
    }

    #[test]
    fn test_missing_fields() {
        let report = ContactMessage::from_payload(json!({})).unwrap_err();
        assert_eq!(report.violations().len(), 3);
        assert!(report.has_violation("name", ViolationKind::Missing));
        assert!(report.has_violation("email", ViolationKind::Missing));
        assert!(report.has_violation("message", ViolationKind::Missing));
    }
}
