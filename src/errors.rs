use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::{AppointmentStatus, Slot};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("slot {0} is already booked")]
    SlotConflict(Slot),

    #[error("appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("appointment {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Booking(BookingError::UnknownService(_)) => StatusCode::NOT_FOUND,
            AppError::Booking(BookingError::AppointmentNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Booking(BookingError::SlotConflict(_)) => StatusCode::CONFLICT,
            AppError::Booking(BookingError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
