use axum::{extract::State, Json};
use tracing::info;

use crate::{
    error::Result,
    extractors::Payload,
    models::{ContactMessage, CreatedResponse},
    AppState,
};

pub async fn handle_send_contact_message(
    State(state): State<AppState>,
    Payload(message): Payload<ContactMessage>,
) -> Result<Json<CreatedResponse>> {
    info!("POST /api/contact - {} characters", message.message.chars().count());

    let id = state
        .persistence
        .create(ContactMessage::COLLECTION, &message)
        .await?;

    Ok(Json(CreatedResponse::ok(id)))
}
