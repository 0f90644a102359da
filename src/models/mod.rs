pub mod appointment;
pub mod intent;
pub mod outcome;
pub mod service;
pub mod slot;

pub use appointment::{Appointment, AppointmentStatus};
pub use intent::{BookingIntent, Sentiment, TimeOfDay, Urgency};
pub use outcome::BookingOutcome;
pub use service::{Service, ServiceCategory};
pub use slot::Slot;
