//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the booking ports, enabling deterministic
//! unit tests without database dependencies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slotbook_core::booking::ports::{AppointmentRepository, ServiceCatalog, UserDirectory};
use slotbook_domain::{
    Appointment, AppointmentQuery, BookingError, Result as DomainResult, Service, ServiceDefaults,
    ServiceLineItem, TimeWindow, User, UserRole,
};

/// In-memory mock for `ServiceCatalog`.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    services: Arc<HashMap<i64, Service>>,
}

impl InMemoryCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services: Arc::new(services.into_iter().map(|s| (s.id, s)).collect()) }
    }
}

#[async_trait]
impl ServiceCatalog for InMemoryCatalog {
    async fn service_defaults(
        &self,
        service_ids: &[i64],
    ) -> DomainResult<HashMap<i64, ServiceDefaults>> {
        Ok(service_ids
            .iter()
            .filter_map(|id| {
                self.services
                    .get(id)
                    .map(|s| (*id, ServiceDefaults { duration: s.duration, price: s.price }))
            })
            .collect())
    }

    async fn service_exists(&self, service_id: i64) -> DomainResult<bool> {
        Ok(self.services.contains_key(&service_id))
    }

    async fn find_service(&self, service_id: i64) -> DomainResult<Option<Service>> {
        Ok(self.services.get(&service_id).cloned())
    }
}

/// In-memory mock for `UserDirectory`.
#[derive(Default, Clone)]
pub struct InMemoryDirectory {
    users: Arc<HashMap<i64, User>>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users: Arc::new(users.into_iter().map(|u| (u.id, u)).collect()) }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn user_has_role(&self, user_id: i64, role: UserRole) -> DomainResult<bool> {
        Ok(self.users.get(&user_id).is_some_and(|user| user.role == Some(role)))
    }

    async fn find_user(&self, user_id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.get(&user_id).cloned())
    }
}

#[derive(Default)]
struct StoreState {
    appointments: HashMap<i64, Appointment>,
    line_items: HashMap<i64, Vec<ServiceLineItem>>,
    next_id: i64,
}

/// In-memory mock for `AppointmentRepository`.
///
/// Mirrors the transactional contract: a simulated line-item failure leaves
/// the store entirely untouched, as a rolled-back transaction would.
#[derive(Default, Clone)]
pub struct InMemoryAppointmentStore {
    state: Arc<Mutex<StoreState>>,
    fail_line_item_writes: Arc<Mutex<bool>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next persist calls fail on the line-item write.
    pub fn fail_line_item_writes(&self, enabled: bool) {
        *self.fail_line_item_writes.lock().expect("mock mutex poisoned") = enabled;
    }

    /// Seed an existing appointment row directly.
    pub fn seed(&self, appointment: Appointment) -> i64 {
        let mut state = self.state.lock().expect("mock mutex poisoned");
        let id = appointment.id.unwrap_or_else(|| {
            state.next_id += 1;
            state.next_id
        });
        state.next_id = state.next_id.max(id);
        state.appointments.insert(id, Appointment { id: Some(id), ..appointment });
        id
    }

    pub fn stored(&self, appointment_id: i64) -> Option<Appointment> {
        self.state.lock().expect("mock mutex poisoned").appointments.get(&appointment_id).cloned()
    }

    pub fn stored_count(&self) -> usize {
        self.state.lock().expect("mock mutex poisoned").appointments.len()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentStore {
    async fn exists(&self, appointment_id: i64) -> DomainResult<bool> {
        Ok(self
            .state
            .lock()
            .expect("mock mutex poisoned")
            .appointments
            .contains_key(&appointment_id))
    }

    async fn persist(
        &self,
        appointment: Appointment,
        services: Vec<ServiceLineItem>,
    ) -> DomainResult<i64> {
        if *self.fail_line_item_writes.lock().expect("mock mutex poisoned")
            && !services.is_empty()
        {
            return Err(BookingError::Database("simulated line item write failure".into()));
        }

        let mut state = self.state.lock().expect("mock mutex poisoned");

        let appointment_id = match appointment.id {
            Some(id) => id,
            None => {
                state.next_id += 1;
                state.next_id
            }
        };

        let mut row = appointment;

        if row.id.is_none() {
            row.id = Some(appointment_id);
            row.hash = Some("testhash0001".into());
            row.book_datetime = Some("2024-01-01 00:00:00".into());
            row.create_datetime = Some("2024-01-01 00:00:00".into());
        }

        row.update_datetime = Some("2024-01-01 00:00:00".into());
        row.services = None;

        state.appointments.insert(appointment_id, row);

        if !services.is_empty() {
            state.line_items.insert(appointment_id, services);
        }

        Ok(appointment_id)
    }

    async fn find(&self, appointment_id: i64) -> DomainResult<Appointment> {
        self.stored(appointment_id).ok_or_else(|| {
            BookingError::NotFound(format!("appointment was not found: {appointment_id}"))
        })
    }

    async fn get(&self, query: AppointmentQuery) -> DomainResult<Vec<Appointment>> {
        let state = self.state.lock().expect("mock mutex poisoned");
        Ok(state
            .appointments
            .values()
            .filter(|row| !row.is_unavailability)
            .filter(|row| query.provider_id.is_none() || row.provider_id == query.provider_id)
            .filter(|row| query.customer_id.is_none() || row.customer_id == query.customer_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, appointment_id: i64) -> DomainResult<()> {
        let mut state = self.state.lock().expect("mock mutex poisoned");
        state.appointments.remove(&appointment_id);
        state.line_items.remove(&appointment_id);
        Ok(())
    }

    async fn services_for_appointment(
        &self,
        appointment_id: i64,
    ) -> DomainResult<Vec<ServiceLineItem>> {
        let state = self.state.lock().expect("mock mutex poisoned");
        let mut items = state.line_items.get(&appointment_id).cloned().unwrap_or_default();
        items.sort_by_key(|item| item.position);
        Ok(items)
    }

    async fn attendants_for_period(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> DomainResult<i64> {
        Ok(self.count_overlapping(&window, provider_id, exclude_appointment_id, |row| {
            row.service_id == Some(service_id)
        }))
    }

    async fn other_service_attendants(
        &self,
        window: TimeWindow,
        service_id: i64,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
    ) -> DomainResult<i64> {
        Ok(self.count_overlapping(&window, provider_id, exclude_appointment_id, |row| {
            row.service_id != Some(service_id)
        }))
    }

    async fn clear_google_sync_ids(&self, provider_id: i64) -> DomainResult<()> {
        let mut state = self.state.lock().expect("mock mutex poisoned");
        for row in state.appointments.values_mut() {
            if row.provider_id == Some(provider_id) {
                row.google_calendar_id = None;
            }
        }
        Ok(())
    }

    async fn clear_caldav_sync_ids(&self, provider_id: i64) -> DomainResult<()> {
        let mut state = self.state.lock().expect("mock mutex poisoned");
        for row in state.appointments.values_mut() {
            if row.provider_id == Some(provider_id) {
                row.caldav_calendar_id = None;
            }
        }
        Ok(())
    }
}

impl InMemoryAppointmentStore {
    fn count_overlapping(
        &self,
        window: &TimeWindow,
        provider_id: i64,
        exclude_appointment_id: Option<i64>,
        service_filter: impl Fn(&Appointment) -> bool,
    ) -> i64 {
        let window_start = window.start_text();
        let window_end = window.end_text();
        let state = self.state.lock().expect("mock mutex poisoned");

        state
            .appointments
            .values()
            .filter(|row| row.provider_id == Some(provider_id))
            .filter(|row| exclude_appointment_id.is_none() || row.id != exclude_appointment_id)
            .filter(|row| service_filter(row))
            .filter(|row| {
                // Canonical text compares chronologically; same asymmetric
                // boundary rule as the storage queries.
                let (Some(start), Some(end)) = (&row.start_datetime, &row.end_datetime) else {
                    return false;
                };
                (start <= &window_start && end > &window_start)
                    || (start < &window_end && end >= &window_end)
            })
            .count() as i64
    }
}

/// Convenience constructors for common fixture records.
pub fn provider(id: i64) -> User {
    User { id, first_name: Some("Pat".into()), role: Some(UserRole::Provider), ..User::default() }
}

pub fn customer(id: i64) -> User {
    User { id, first_name: Some("Casey".into()), role: Some(UserRole::Customer), ..User::default() }
}

pub fn service(id: i64, duration: Option<i64>, price: Option<f64>) -> Service {
    Service { id, name: Some(format!("Service {id}")), duration, price, category: None }
}
