//! JSON body extractor that hands back validated records

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::validation::{FromPayload, ValidationReport, ViolationKind};

/// A request body parsed as JSON and validated into `T`.
///
/// Unreadable bodies and invalid records are both rejected with a
/// validation report, before any handler code runs.
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: FromPayload,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        T::from_payload(value).map(Payload).map_err(AppError::Validation)
    }
}

fn body_rejection(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "JSON decode error".to_string(),
        _ => rejection.body_text(),
    };

    AppError::Validation(ValidationReport::single("body", ViolationKind::Json, message))
}
