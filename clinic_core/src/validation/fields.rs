//! Type-directed extraction of payload fields

use super::{ValidationReport, ViolationKind};
use crate::models::datetime;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// A closed set of string values, such as an enumerated field.
pub trait Choice: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse_choice(raw: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == raw)
    }

    fn expected() -> String {
        let names: Vec<String> = Self::VARIANTS
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect();
        names.join(", ")
    }
}

pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    report: ValidationReport,
}

impl<'a> FieldReader<'a> {
    pub fn new(payload: &'a Value) -> Result<Self, ValidationReport> {
        match payload.as_object() {
            Some(object) => Ok(Self {
                object,
                report: ValidationReport::new(),
            }),
            None => Err(ValidationReport::single(
                "body",
                ViolationKind::Type,
                "Input should be a valid JSON object",
            )),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|v| !v.is_null())
    }

    fn missing(&mut self, field: &str) {
        self.report.add(field, ViolationKind::Missing, "Field required");
    }

    fn text(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                self.report
                    .add(field, ViolationKind::Type, "Input should be a valid string");
                None
            }
        }
    }

    pub fn required_text(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(value) => self.text(field, value),
            None => {
                self.missing(field);
                None
            }
        }
    }

    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        let value = self.present(field)?;
        self.text(field, value)
    }

    fn choice<T: Choice>(&mut self, field: &str, value: &Value) -> Option<T> {
        let raw = self.text(field, value)?;
        match T::parse_choice(&raw) {
            Some(choice) => Some(choice),
            None => {
                self.report.add(
                    field,
                    ViolationKind::Enum,
                    format!("Input should be one of {}", T::expected()),
                );
                None
            }
        }
    }

    pub fn required_choice<T: Choice>(&mut self, field: &str) -> Option<T> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };
        self.choice(field, value)
    }

    pub fn optional_choice<T: Choice>(&mut self, field: &str) -> Option<T> {
        let value = self.present(field)?;
        self.choice(field, value)
    }

    pub fn required_date_time(&mut self, field: &str) -> Option<NaiveDateTime> {
        let Some(value) = self.present(field) else {
            self.missing(field);
            return None;
        };

        let parsed = match value {
            Value::String(raw) => datetime::parse_date_time(raw),
            Value::Number(number) => number.as_f64().and_then(datetime::from_timestamp),
            _ => {
                self.report.add(
                    field,
                    ViolationKind::Type,
                    "Input should be a valid datetime",
                );
                return None;
            }
        };

        if parsed.is_none() {
            self.report.add(
                field,
                ViolationKind::Type,
                "Input should be a valid datetime in ISO 8601 format",
            );
        }
        parsed
    }

    pub fn finish(self) -> ValidationReport {
        self.report
    }
}
