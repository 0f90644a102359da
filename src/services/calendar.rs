use crate::models::{Appointment, AppointmentStatus, Service};

pub fn generate_ics(appointment: &Appointment, service: &Service, business_name: &str) -> String {
    let dtstart = appointment
        .scheduled_time
        .starts_at()
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtend = appointment.ends_at().format("%Y%m%dT%H%M%S").to_string();
    let dtstamp = appointment.created_at.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@booking-agent", appointment.appointment_id);

    let summary = format!("{} appointment with {}", service.title(), business_name);
    let description = format!(
        "{} service, {} minutes, ${}",
        service.category, appointment.duration_minutes, service.price
    );
    let status = match appointment.status {
        AppointmentStatus::Cancelled => "CANCELLED",
        _ => "CONFIRMED",
    };

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Booking Agent//Appointments//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         STATUS:{status}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    )
}
