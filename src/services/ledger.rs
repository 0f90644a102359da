use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::BookingError;
use crate::models::{Appointment, AppointmentStatus, Slot};
use crate::services::catalog::ServiceCatalog;
use crate::services::clock::Clock;

const APPOINTMENT_ID_PREFIX: &str = "apt_";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_appointments: usize,
    pub confirmed_appointments: usize,
    pub available_slots: usize,
    pub next_available_slot: Option<Slot>,
}

/// Authoritative store of appointments.
///
/// At most one non-cancelled appointment may hold a given slot. `create`
/// checks and claims the slot within a single `&mut self` call, so the
/// reservation cannot interleave with another as long as callers share the
/// ledger behind a lock.
pub struct BookingLedger {
    catalog: Arc<ServiceCatalog>,
    clock: Arc<dyn Clock>,
    appointments: Vec<Appointment>,
    // slot -> index into `appointments`, non-cancelled only
    occupied: HashMap<Slot, usize>,
    next_id: u32,
}

impl BookingLedger {
    pub fn new(catalog: Arc<ServiceCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            clock,
            appointments: Vec::new(),
            occupied: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn is_occupied(&self, slot: &Slot) -> bool {
        self.occupied.contains_key(slot)
    }

    pub fn available_slots(&self, all_slots: &[Slot]) -> Vec<Slot> {
        all_slots
            .iter()
            .filter(|slot| !self.is_occupied(slot))
            .copied()
            .collect()
    }

    pub fn create(
        &mut self,
        user_id: &str,
        service_name: &str,
        slot: Slot,
    ) -> Result<Appointment, BookingError> {
        let service = self.catalog.lookup(service_name)?;

        if self.is_occupied(&slot) {
            tracing::warn!(user_id, service = service_name, %slot, "slot already booked");
            return Err(BookingError::SlotConflict(slot));
        }

        let now = self.clock.now();
        let appointment = Appointment {
            appointment_id: format!("{APPOINTMENT_ID_PREFIX}{:04}", self.next_id),
            user_id: user_id.to_string(),
            service: service.name.clone(),
            scheduled_time: slot,
            duration_minutes: service.duration_minutes,
            status: AppointmentStatus::Confirmed,
            created_at: now,
            confirmed_at: Some(now),
        };
        self.next_id += 1;

        self.occupied.insert(slot, self.appointments.len());
        self.appointments.push(appointment.clone());

        tracing::info!(
            appointment_id = %appointment.appointment_id,
            user_id,
            service = service_name,
            %slot,
            "appointment created"
        );

        Ok(appointment)
    }

    pub fn get(&self, appointment_id: &str) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|a| a.appointment_id == appointment_id)
    }

    /// All appointments in creation order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn appointments_for_user(&self, user_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.user_id == user_id)
            .collect()
    }

    pub fn cancel(&mut self, appointment_id: &str) -> Result<Appointment, BookingError> {
        self.transition(appointment_id, AppointmentStatus::Cancelled)
    }

    pub fn complete(&mut self, appointment_id: &str) -> Result<Appointment, BookingError> {
        self.transition(appointment_id, AppointmentStatus::Completed)
    }

    fn transition(
        &mut self,
        appointment_id: &str,
        to: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        let index = self
            .appointments
            .iter()
            .position(|a| a.appointment_id == appointment_id)
            .ok_or_else(|| BookingError::AppointmentNotFound(appointment_id.to_string()))?;

        let appointment = &mut self.appointments[index];
        if !appointment.status.can_transition_to(to) {
            return Err(BookingError::InvalidTransition {
                id: appointment_id.to_string(),
                from: appointment.status,
                to,
            });
        }

        appointment.status = to;
        if to == AppointmentStatus::Cancelled {
            self.occupied.remove(&appointment.scheduled_time);
        }

        tracing::info!(appointment_id, status = to.as_str(), "appointment updated");
        Ok(appointment.clone())
    }

    pub fn stats(&self, all_slots: &[Slot]) -> LedgerStats {
        let available = self.available_slots(all_slots);
        LedgerStats {
            total_appointments: self.appointments.len(),
            confirmed_appointments: self
                .appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Confirmed)
                .count(),
            available_slots: available.len(),
            next_available_slot: available.first().copied(),
        }
    }
}
