use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::errors::BookingError;
use crate::models::{Appointment, BookingOutcome, Slot};
use crate::services::catalog::ServiceCatalog;
use crate::services::clock::Clock;
use crate::services::intent::IntentParser;
use crate::services::ledger::{BookingLedger, LedgerStats};
use crate::services::slots::SlotCalendar;

const DEFAULT_MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookingStats {
    #[serde(flatten)]
    pub ledger: LedgerStats,
    pub services_offered: usize,
}

/// Turns a free-text request into a booking decision.
pub struct BookingWorkflow {
    catalog: Arc<ServiceCatalog>,
    calendar: SlotCalendar,
    parser: IntentParser,
    ledger: BookingLedger,
    clock: Arc<dyn Clock>,
    slots: Vec<Slot>,
    generated_at: NaiveDateTime,
    max_suggestions: usize,
}

impl BookingWorkflow {
    pub fn new(catalog: ServiceCatalog, calendar: SlotCalendar, clock: Arc<dyn Clock>) -> Self {
        let catalog = Arc::new(catalog);
        let parser = IntentParser::new(&catalog, Arc::clone(&clock));
        let ledger = BookingLedger::new(Arc::clone(&catalog), Arc::clone(&clock));
        let generated_at = clock.now();
        let slots = calendar.generate(generated_at);

        tracing::info!(
            services = catalog.len(),
            slots = slots.len(),
            "booking workflow ready"
        );

        Self {
            catalog,
            calendar,
            parser,
            ledger,
            clock,
            slots,
            generated_at,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions.max(1);
        self
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BookingLedger {
        &mut self.ledger
    }

    /// The generated slot inventory, occupied or not.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Regenerates the slot inventory from the current time.
    pub fn refresh_slots(&mut self) {
        let now = self.clock.now();
        self.slots = self.calendar.generate(now);
        self.generated_at = now;
        tracing::debug!(slots = self.slots.len(), "slot inventory refreshed");
    }

    fn refresh_if_stale(&mut self) {
        if self.clock.now() > self.generated_at {
            self.refresh_slots();
        }
    }

    // Inventory slots that have not started yet, occupied or not.
    fn upcoming_slots(&self) -> Vec<Slot> {
        let now = self.clock.now();
        self.slots
            .iter()
            .filter(|slot| slot.starts_at() > now)
            .copied()
            .collect()
    }

    fn candidate_slots(
        &mut self,
        service: &str,
        date_preference: Option<NaiveDate>,
    ) -> Result<Vec<Slot>, BookingError> {
        self.catalog.lookup(service)?;
        self.refresh_if_stale();

        Ok(self
            .ledger
            .available_slots(&self.upcoming_slots())
            .into_iter()
            .filter(|slot| date_preference.map_or(true, |d| slot.date() == d))
            .collect())
    }

    /// Earliest free slots for `service`, at most `max_suggestions` of them.
    pub fn find_available_slots(
        &mut self,
        service: &str,
        date_preference: Option<NaiveDate>,
    ) -> Result<Vec<Slot>, BookingError> {
        let mut slots = self.candidate_slots(service, date_preference)?;
        slots.truncate(self.max_suggestions);
        Ok(slots)
    }

    pub fn process(&mut self, user_id: &str, text: &str) -> Result<BookingOutcome, BookingError> {
        let intent = self.parser.parse(text);

        tracing::info!(
            user_id,
            service = ?intent.service,
            date = ?intent.date_preference,
            urgency = ?intent.urgency,
            "processing booking request"
        );

        let Some(service_name) = intent.service else {
            return Ok(BookingOutcome::ClarificationNeeded {
                available_services: self.service_names(),
            });
        };

        let candidates = self.candidate_slots(&service_name, intent.date_preference)?;
        let Some(&slot) = candidates.first() else {
            tracing::info!(user_id, service = %service_name, "no slots available");
            return Ok(BookingOutcome::NoSlotsAvailable {
                alternative_services: self
                    .service_names()
                    .into_iter()
                    .filter(|name| *name != service_name)
                    .collect(),
                service: service_name,
                date_preference: intent.date_preference,
            });
        };

        let appointment = self.ledger.create(user_id, &service_name, slot)?;
        let service = self.catalog.lookup(&service_name)?;

        Ok(BookingOutcome::Booked {
            appointment,
            price_quoted: service.price,
            service_category: service.category,
        })
    }

    pub fn appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.ledger.get(appointment_id)
    }

    pub fn cancel(&mut self, appointment_id: &str) -> Result<Appointment, BookingError> {
        self.ledger.cancel(appointment_id)
    }

    pub fn complete(&mut self, appointment_id: &str) -> Result<Appointment, BookingError> {
        self.ledger.complete(appointment_id)
    }

    pub fn stats(&mut self) -> BookingStats {
        self.refresh_if_stale();
        BookingStats {
            ledger: self.ledger.stats(&self.upcoming_slots()),
            services_offered: self.catalog.len(),
        }
    }

    fn service_names(&self) -> Vec<String> {
        self.catalog.names().into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, ServiceCategory};
    use crate::services::clock::FixedClock;
    use crate::services::slots::SlotCalendarConfig;
    use chrono::Duration;
    use std::sync::Mutex;

    struct StepClock {
        now: Mutex<NaiveDateTime>,
    }

    impl StepClock {
        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn workflow_at(now: &str) -> BookingWorkflow {
        BookingWorkflow::new(
            ServiceCatalog::default(),
            SlotCalendar::new(SlotCalendarConfig::default()).unwrap(),
            Arc::new(FixedClock::new(dt(now))),
        )
    }

    // 2025-06-16 is a Monday
    fn workflow() -> BookingWorkflow {
        workflow_at("2025-06-16 08:00")
    }

    #[test]
    fn test_books_dentist_tomorrow() {
        let mut wf = workflow();
        let outcome = wf
            .process("dev", "I need a dentist appointment tomorrow afternoon")
            .unwrap();

        match outcome {
            BookingOutcome::Booked {
                appointment,
                price_quoted,
                service_category,
            } => {
                assert_eq!(appointment.service, "dentist");
                assert_eq!(appointment.duration_minutes, 45);
                assert_eq!(appointment.user_id, "dev");
                assert_eq!(appointment.status, AppointmentStatus::Confirmed);
                assert_eq!(appointment.scheduled_time.date(), date("2025-06-17"));
                assert_eq!(appointment.scheduled_time.to_string(), "2025-06-17 09:00");
                assert_eq!(price_quoted, 150);
                assert_eq!(service_category, ServiceCategory::Medical);
            }
            other => panic!("expected booking, got {other:?}"),
        }
    }

    #[test]
    fn test_clarification_lists_catalog() {
        let mut wf = workflow();
        let outcome = wf.process("dev", "book something").unwrap();
        assert_eq!(
            outcome,
            BookingOutcome::ClarificationNeeded {
                available_services: vec![
                    "doctor".to_string(),
                    "dentist".to_string(),
                    "therapy".to_string(),
                    "consultation".to_string(),
                    "massage".to_string(),
                    "checkup".to_string(),
                ],
            }
        );
        assert!(wf.ledger().appointments().is_empty());
    }

    #[test]
    fn test_no_slots_when_date_fully_booked() {
        let mut wf = workflow();
        let wednesday = date("2025-06-18");
        let day_slots: Vec<Slot> = wf
            .slots()
            .iter()
            .filter(|s| s.date() == wednesday)
            .copied()
            .collect();
        assert_eq!(day_slots.len(), 16);
        for slot in day_slots {
            wf.ledger_mut().create("filler", "doctor", slot).unwrap();
        }

        let outcome = wf.process("dev", "doctor on wednesday").unwrap();
        assert_eq!(
            outcome,
            BookingOutcome::NoSlotsAvailable {
                service: "doctor".to_string(),
                date_preference: Some(wednesday),
                alternative_services: vec![
                    "dentist".to_string(),
                    "therapy".to_string(),
                    "consultation".to_string(),
                    "massage".to_string(),
                    "checkup".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_date_outside_horizon_has_no_slots() {
        let mut wf = workflow();
        // "monday" on a Monday is next week, past the 7-day horizon
        let outcome = wf.process("dev", "massage monday").unwrap();
        assert!(matches!(outcome, BookingOutcome::NoSlotsAvailable { .. }));
    }

    #[test]
    fn test_weekend_tomorrow_has_no_slots() {
        // Friday: tomorrow is Saturday
        let mut wf = workflow_at("2025-06-20 08:00");
        let outcome = wf.process("dev", "checkup tomorrow").unwrap();
        assert!(matches!(
            outcome,
            BookingOutcome::NoSlotsAvailable { date_preference: Some(d), .. } if d == date("2025-06-21")
        ));
    }

    #[test]
    fn test_successive_requests_take_next_slot() {
        let mut wf = workflow();
        let mut booked = Vec::new();
        for user in ["a", "b", "c"] {
            match wf.process(user, "massage on thursday").unwrap() {
                BookingOutcome::Booked { appointment, .. } => {
                    booked.push(appointment.scheduled_time.to_string())
                }
                other => panic!("expected booking, got {other:?}"),
            }
        }
        assert_eq!(
            booked,
            vec!["2025-06-19 09:00", "2025-06-19 09:30", "2025-06-19 10:00"]
        );
    }

    #[test]
    fn test_without_date_books_earliest_overall() {
        let mut wf = workflow();
        let outcome = wf.process("dev", "consultation please").unwrap();
        match outcome {
            BookingOutcome::Booked { appointment, .. } => {
                assert_eq!(appointment.scheduled_time.to_string(), "2025-06-16 09:30");
            }
            other => panic!("expected booking, got {other:?}"),
        }
    }

    #[test]
    fn test_find_available_slots_limited() {
        let mut wf = workflow().with_max_suggestions(3);
        let slots = wf.find_available_slots("doctor", None).unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].to_string(), "2025-06-16 09:30");

        let err = wf.find_available_slots("haircut", None).unwrap_err();
        assert_eq!(err, BookingError::UnknownService("haircut".to_string()));
    }

    #[test]
    fn test_stats_track_bookings() {
        let mut wf = workflow();
        let before = wf.stats();
        assert_eq!(before.services_offered, 6);
        assert_eq!(before.ledger.total_appointments, 0);

        wf.process("dev", "dentist tomorrow").unwrap();
        let after = wf.stats();
        assert_eq!(after.ledger.total_appointments, 1);
        assert_eq!(after.ledger.confirmed_appointments, 1);
        assert_eq!(after.ledger.available_slots, before.ledger.available_slots - 1);
    }

    #[test]
    fn test_cancel_reopens_slot_for_next_request() {
        let mut wf = workflow();
        let first = match wf.process("a", "doctor tomorrow").unwrap() {
            BookingOutcome::Booked { appointment, .. } => appointment,
            other => panic!("expected booking, got {other:?}"),
        };
        wf.cancel(&first.appointment_id).unwrap();

        match wf.process("b", "doctor tomorrow").unwrap() {
            BookingOutcome::Booked { appointment, .. } => {
                assert_eq!(appointment.scheduled_time, first.scheduled_time);
                assert_eq!(appointment.appointment_id, "apt_0002");
            }
            other => panic!("expected booking, got {other:?}"),
        }
    }

    #[test]
    fn test_refresh_slots_regenerates_inventory() {
        let mut wf = workflow();
        let before = wf.slots().len();
        wf.refresh_slots();
        assert_eq!(wf.slots().len(), before);
    }

    #[test]
    fn test_inventory_follows_the_clock() {
        let clock = Arc::new(StepClock {
            now: Mutex::new(dt("2025-06-16 08:00")),
        });
        let mut wf = BookingWorkflow::new(
            ServiceCatalog::default(),
            SlotCalendar::new(SlotCalendarConfig::default()).unwrap(),
            clock.clone(),
        );
        assert_eq!(wf.stats().ledger.available_slots, 79);

        // 11:00 plus one hour lead: Monday keeps 12:30..16:30
        clock.advance(Duration::hours(3));
        let stats = wf.stats();
        assert_eq!(stats.ledger.available_slots, 9 + 16 * 4);
        assert_eq!(
            stats.ledger.next_available_slot.map(|s| s.to_string()),
            Some("2025-06-16 12:30".to_string())
        );
        let suggested = wf.find_available_slots("doctor", None).unwrap();
        assert_eq!(Some(suggested[0]), stats.ledger.next_available_slot);

        // past the original horizon, now Tuesday 2025-06-24 11:00
        clock.advance(Duration::days(8));
        match wf.process("dev", "doctor please").unwrap() {
            BookingOutcome::Booked { appointment, .. } => {
                assert_eq!(appointment.scheduled_time.to_string(), "2025-06-24 12:30");
            }
            other => panic!("expected booking, got {other:?}"),
        }
        assert!(wf.slots().iter().all(|s| s.date() >= date("2025-06-24")));
        assert_eq!(
            wf.stats().ledger.next_available_slot.map(|s| s.to_string()),
            Some("2025-06-24 13:00".to_string())
        );
    }
}
