//! Route table

use axum::{
    routing::{get, post},
    Router,
};

use super::{appointments, contact, diagnostics};
use crate::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(diagnostics::handle_root))
        .route("/test", get(diagnostics::handle_store_diagnostics))
        .route("/api/hello", get(diagnostics::handle_hello))
        .route(
            "/api/appointments",
            get(appointments::handle_list_appointments).post(appointments::handle_create_appointment),
        )
        .route("/api/contact", post(contact::handle_send_contact_message))
}
