//! Appointment booking requests

use crate::models::datetime;
use crate::validation::{
    validate_email_address, Choice, FieldReader, FromPayload, Validatable, ValidationReport,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl Choice for PetType {
    const VARIANTS: &'static [Self] = &[
        PetType::Dog,
        PetType::Cat,
        PetType::Bird,
        PetType::Rabbit,
        PetType::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bird => "Bird",
            PetType::Rabbit => "Rabbit",
            PetType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl Choice for AppointmentStatus {
    const VARIANTS: &'static [Self] = &[
        AppointmentStatus::Requested,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Requested => "requested",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// A validated booking request, as it is written to the `appointment` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub pet_name: String,
    pub pet_type: PetType,
    #[serde(serialize_with = "datetime::serialize")]
    pub preferred_date: NaiveDateTime,
    pub message: Option<String>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub const COLLECTION: &'static str = "appointment";
}

#[derive(Debug, Default, Validate)]
struct AppointmentInput {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    name: Option<String>,

    #[validate(custom(function = "validate_email_address", message = "Invalid email format"))]
    email: Option<String>,

    phone: Option<String>,

    #[validate(length(min = 1, message = "Pet name cannot be empty"))]
    pet_name: Option<String>,

    pet_type: Option<PetType>,
    preferred_date: Option<NaiveDateTime>,
    message: Option<String>,
    status: Option<AppointmentStatus>,
}

impl FromPayload for Appointment {
    fn from_payload(payload: Value) -> Result<Self, ValidationReport> {
        let mut reader = FieldReader::new(&payload)?;

        let input = AppointmentInput {
            name: reader.required_text("name"),
            email: reader.required_text("email"),
            phone: reader.optional_text("phone"),
            pet_name: reader.required_text("pet_name"),
            pet_type: reader.required_choice("pet_type"),
            preferred_date: reader.required_date_time("preferred_date"),
            message: reader.optional_text("message"),
            status: reader.optional_choice("status"),
        };

        let mut report = reader.finish();
        report.merge(input.validate_report());

        let AppointmentInput {
            name: Some(name),
            email: Some(email),
            phone,
            pet_name: Some(pet_name),
            pet_type: Some(pet_type),
            preferred_date: Some(preferred_date),
            message,
            status: requested_status,
        } = input
        else {
            return Err(report);
        };

        // new bookings always start as requested
        if let Some(ignored) = requested_status.filter(|s| *s != AppointmentStatus::Requested) {
            tracing::debug!("Ignoring client-supplied status '{}'", ignored.as_str());
        }

        report.into_result(Appointment {
            name,
            email,
            phone,
            pet_name,
            pet_type,
            preferred_date,
            message,
            status: AppointmentStatus::Requested,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationKind;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "name": "Jo",
            "email": "jo@x.com",
            "pet_name": "Rex",
            "pet_type": "Dog",
            "preferred_date": "2025-01-01T10:00:00"
        })
    }

    #[test]
    fn test_valid_appointment() {
        let appointment = Appointment::from_payload(valid_payload()).unwrap();
        assert_eq!(appointment.name, "Jo");
        assert_eq!(appointment.pet_type, PetType::Dog);
        assert_eq!(appointment.phone, None);
        assert_eq!(appointment.status, AppointmentStatus::Requested);
    }

    #[test]
    fn test_status_is_not_client_settable() {
        let mut payload = valid_payload();
        payload["status"] = json!("confirmed");

        let appointment = Appointment::from_payload(payload).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Requested);
    }

    #[test]
    fn test_status_must_be_a_known_value() {
        let mut payload = valid_payload();
        payload["status"] = json!("bogus");
        let report = Appointment::from_payload(payload).unwrap_err();
        assert!(report.has_violation("status", ViolationKind::Enum));

        let mut payload = valid_payload();
        payload["status"] = json!(5);
        let report = Appointment::from_payload(payload).unwrap_err();
        assert_eq!(report.violations().len(), 1);
        assert!(report.has_violation("status", ViolationKind::Type));
    }

    #[test]
    fn test_email_domain_needs_a_dot() {
        let mut payload = valid_payload();
        payload["email"] = json!("jo@x");
        let report = Appointment::from_payload(payload).unwrap_err();
        assert!(report.has_violation("email", ViolationKind::Email));
        assert_eq!(report.violations()[0].message, "Invalid email format");
    }

    #[test]
    fn test_every_pet_type_is_accepted() {
        for pet_type in ["Dog", "Cat", "Bird", "Rabbit", "Other"] {
            let mut payload = valid_payload();
            payload["pet_type"] = json!(pet_type);
            let appointment = Appointment::from_payload(payload).unwrap();
            assert_eq!(appointment.pet_type.as_str(), pet_type);
        }
    }

    #[test]
    fn test_unknown_pet_type_is_rejected() {
        for pet_type in ["Hamster", "dog", ""] {
            let mut payload = valid_payload();
            payload["pet_type"] = json!(pet_type);
            let report = Appointment::from_payload(payload).unwrap_err();
            assert!(report.has_violation("pet_type", ViolationKind::Enum));
        }
    }

    #[test]
    fn test_all_violations_are_reported_together() {
        let payload = json!({
            "name": "",
            "email": "not-an-email",
            "pet_type": "Lizard",
            "preferred_date": 12.5e40,
            "phone": 5551234
        });

        let report = Appointment::from_payload(payload).unwrap_err();
        assert!(report.has_violation("name", ViolationKind::Length));
        assert!(report.has_violation("email", ViolationKind::Email));
        assert!(report.has_violation("pet_name", ViolationKind::Missing));
        assert!(report.has_violation("pet_type", ViolationKind::Enum));
        assert!(report.has_violation("preferred_date", ViolationKind::Type));
        assert!(report.has_violation("phone", ViolationKind::Type));
    }

    #[test]
    fn test_serialized_document_shape() {
        let mut payload = valid_payload();
        payload["phone"] = json!("555-0100");

        let appointment = Appointment::from_payload(payload).unwrap();
        let document = serde_json::to_value(&appointment).unwrap();

        assert_eq!(document["pet_type"], "Dog");
        assert_eq!(document["status"], "requested");
        assert_eq!(document["preferred_date"], "2025-01-01T10:00:00");
        assert_eq!(document["phone"], "555-0100");
        assert_eq!(document["message"], Value::Null);
    }
}
