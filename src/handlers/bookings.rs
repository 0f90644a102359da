use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingOutcome, Slot};
use crate::services::workflow::BookingStats;
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
pub struct BookingRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct BookingResponse {
    message: String,
    outcome: BookingOutcome,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let user_id = req.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::BadRequest("user_id must not be empty".to_string()));
    }

    tracing::info!(user_id, message = %req.message, "incoming booking request");

    let outcome = state.workflow().process(user_id, &req.message)?;
    tracing::info!(user_id, booked = outcome.is_booked(), "booking request handled");

    Ok(Json(BookingResponse {
        message: outcome.summary(),
        outcome,
    }))
}

// GET /api/slots
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub service: String,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    service: String,
    date: Option<NaiveDate>,
    slots: Vec<Slot>,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let service = query.service.trim().to_lowercase();
    let slots = state
        .workflow()
        .find_available_slots(&service, query.date)?;

    Ok(Json(SlotsResponse {
        service,
        date: query.date,
        slots,
    }))
}

// GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<BookingStats> {
    Json(state.workflow().stats())
}
