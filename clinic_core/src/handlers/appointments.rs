//! Appointment booking endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{AppError, Result},
    extractors::Payload,
    models::{Appointment, AppointmentResponse, CreatedResponse},
    validation::{Choice, ValidationReport, ViolationKind},
    AppState,
};

pub const DEFAULT_LIST_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<i64>,
}

pub async fn handle_create_appointment(
    State(state): State<AppState>,
    Payload(appointment): Payload<Appointment>,
) -> Result<Json<CreatedResponse>> {
    info!(
        "POST /api/appointments - pet_type: {}, preferred_date: {}",
        appointment.pet_type.as_str(),
        appointment.preferred_date
    );

    let id = state
        .persistence
        .create(Appointment::COLLECTION, &appointment)
        .await?;

    Ok(Json(CreatedResponse::ok(id)))
}

pub async fn handle_list_appointments(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<AppointmentResponse>>> {
    let Query(params) = query.map_err(|_| {
        AppError::Validation(ValidationReport::single(
            "limit",
            ViolationKind::Type,
            "Input should be a valid integer",
        ))
    })?;
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    info!("GET /api/appointments - limit: {}", limit);

    let documents = state
        .persistence
        .read_many(Appointment::COLLECTION, limit)
        .await?;

    Ok(Json(documents.iter().map(AppointmentResponse::from).collect()))
}
