//! Structural validation of incoming JSON payloads

pub mod fields;
pub mod rules;

pub use fields::{Choice, FieldReader};
pub use rules::validate_email_address;

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    Type,
    Enum,
    Length,
    Email,
    Json,
}

impl ViolationKind {
    fn from_rule_code(code: &str) -> Self {
        // only length and email rules are declared on payload inputs
        match code {
            "email" => ViolationKind::Email,
            _ => ViolationKind::Length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(rename = "code")]
    pub kind: ViolationKind,
    pub message: String,
}

/// Every offending field of one payload, in the order it was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.add(field, kind, message);
        report
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                violations.push(FieldViolation {
                    field: field.clone(),
                    kind: ViolationKind::from_rule_code(&error.code),
                    message,
                });
            }
        }

        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self { violations }
    }

    pub fn add(&mut self, field: &str, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            kind,
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn has_violation(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, ValidationReport> {
        if self.is_valid() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.violations.iter().map(|v| v.field.as_str()).collect();
        write!(f, "{} invalid field(s): {}", self.violations.len(), fields.join(", "))
    }
}

impl std::error::Error for ValidationReport {}

/// Rule-based checks declared with `#[derive(Validate)]`.
pub trait Validatable {
    fn validate_report(&self) -> ValidationReport;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_report(&self) -> ValidationReport {
        match self.validate() {
            Ok(_) => ValidationReport::new(),
            Err(errors) => ValidationReport::from_validation_errors(errors),
        }
    }
}

/// Builds a strongly-typed record from an untyped JSON payload.
pub trait FromPayload: Sized {
    fn from_payload(payload: Value) -> Result<Self, ValidationReport>;
}
