pub mod admin;
pub mod bookings;
pub mod calendar;
pub mod health;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/bookings", post(bookings::create_booking))
        .route("/api/slots", get(bookings::get_slots))
        .route("/api/stats", get(bookings::get_stats))
        .route(
            "/api/admin/appointments",
            get(admin::get_appointments),
        )
        .route(
            "/api/admin/appointments/:id/cancel",
            post(admin::cancel_appointment),
        )
        .route(
            "/api/admin/appointments/:id/complete",
            post(admin::complete_appointment),
        )
        .route(
            "/calendar/:appointment_id",
            get(calendar::download_ics),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
