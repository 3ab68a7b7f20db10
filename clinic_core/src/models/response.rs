//! API response bodies

use crate::models::appointment::AppointmentStatus;
use crate::models::datetime::format_date_time;
use crate::persistence::Document;
use crate::validation::Choice;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedResponse {
    pub id: String,
    pub status: &'static str,
}

impl CreatedResponse {
    pub fn ok(id: String) -> Self {
        Self { id, status: "ok" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Flat view of a stored appointment. Every field the store may lack is
/// optional; `status` falls back to `requested`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pet_name: Option<String>,
    pub pet_type: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
}

impl From<&Document> for AppointmentResponse {
    fn from(doc: &Document) -> Self {
        let text = |key: &str| doc.text(key).map(str::to_string);
        let date_time = |key: &str| doc.date_time(key).as_ref().map(format_date_time);

        Self {
            id: doc.id.clone(),
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            pet_name: text("pet_name"),
            pet_type: text("pet_type"),
            preferred_date: date_time("preferred_date"),
            message: text("message"),
            status: doc
                .text("status")
                .unwrap_or(AppointmentStatus::default().as_str())
                .to_string(),
            created_at: date_time("created_at"),
        }
    }
}
