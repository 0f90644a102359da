use chrono::NaiveDate;
use serde::Serialize;

use super::{Appointment, ServiceCategory};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingOutcome {
    ClarificationNeeded {
        available_services: Vec<String>,
    },
    NoSlotsAvailable {
        service: String,
        date_preference: Option<NaiveDate>,
        alternative_services: Vec<String>,
    },
    Booked {
        appointment: Appointment,
        price_quoted: u32,
        service_category: ServiceCategory,
    },
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }

    /// One-line message for whoever is rendering the outcome.
    pub fn summary(&self) -> String {
        match self {
            BookingOutcome::ClarificationNeeded { available_services } => format!(
                "Which service are you interested in? We offer: {}",
                available_services.join(", ")
            ),
            BookingOutcome::NoSlotsAvailable {
                service,
                date_preference,
                alternative_services,
            } => {
                let when = date_preference
                    .map(|d| format!(" on {}", d.format("%A, %B %d")))
                    .unwrap_or_default();
                format!(
                    "Sorry, no available slots found for {service} appointments{when}. Please try a different date or one of: {}",
                    alternative_services.join(", ")
                )
            }
            BookingOutcome::Booked {
                appointment,
                price_quoted,
                ..
            } => format!(
                "Appointment {} confirmed for {} on {} ({} min, ${price_quoted})",
                appointment.appointment_id,
                appointment.service,
                appointment.scheduled_time.to_human_readable(),
                appointment.duration_minutes,
            ),
        }
    }
}
