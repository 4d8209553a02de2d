use crate::domain::{Booking, BookingId, BookingStatus, NewBooking, ScheduleId, UserId};
use crate::ports::Result;
use crate::ports::booking_repository::{
    BookingRepository as BookingRepositoryTrait, SaveBookingError,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct State {
    next_id: u64,
    bookings: BTreeMap<BookingId, Booking>,
}

/// In-memory implementation of BookingRepository
///
/// Assigns sequential ids and enforces the one-active-booking-per-slot rule
/// under its lock, the same way the unique index does in PostgreSQL.
pub struct BookingRepository {
    state: Mutex<State>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a booking as-is for testing purposes
    pub fn insert(&self, booking: Booking) {
        let mut state = self.state();
        state.next_id = state.next_id.max(booking.booking_id.value());
        state.bookings.insert(booking.booking_id, booking);
    }

    /// Snapshot of every stored booking, ordered by id
    pub fn all(&self) -> Vec<Booking> {
        self.state().bookings.values().cloned().collect()
    }
}

impl Default for BookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn occupies(booking: &Booking, schedule_id: ScheduleId, booking_date: NaiveDate) -> bool {
    booking.schedule_id == schedule_id
        && booking.booking_date == booking_date
        && booking.status.is_active()
        && booking.deleted_at.is_none()
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn create(&self, booking: NewBooking) -> std::result::Result<Booking, SaveBookingError> {
        let mut state = self.state();

        if state
            .bookings
            .values()
            .any(|b| occupies(b, booking.schedule_id, booking.booking_date))
        {
            return Err(SaveBookingError::SlotTaken);
        }

        state.next_id += 1;
        let now = Utc::now();
        let stored = Booking {
            booking_id: BookingId::new(state.next_id),
            user_id: booking.user_id,
            schedule_id: booking.schedule_id,
            booking_date: booking.booking_date,
            status: booking.status,
            total_price: booking.total_price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.bookings.insert(stored.booking_id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .state()
            .bookings
            .get(&booking_id)
            .filter(|b| b.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .state()
            .bookings
            .values()
            .filter(|b| b.user_id == user_id && b.deleted_at.is_none())
            .cloned()
            .collect();
        bookings.sort_by(|a, b| {
            b.booking_date
                .cmp(&a.booking_date)
                .then(b.booking_id.cmp(&a.booking_id))
        });
        Ok(bookings)
    }

    async fn find_active_for_slot(
        &self,
        schedule_id: ScheduleId,
        booking_date: NaiveDate,
    ) -> Result<Option<Booking>> {
        Ok(self
            .state()
            .bookings
            .values()
            .find(|b| occupies(b, schedule_id, booking_date))
            .cloned())
    }

    async fn count_active_from(
        &self,
        schedule_id: ScheduleId,
        from_date: NaiveDate,
    ) -> Result<u64> {
        let count = self
            .state()
            .bookings
            .values()
            .filter(|b| {
                b.schedule_id == schedule_id
                    && b.booking_date >= from_date
                    && b.status.is_active()
                    && b.deleted_at.is_none()
            })
            .count();
        Ok(count as u64)
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut state = self.state();
        match state.bookings.get_mut(&booking_id) {
            Some(booking) if booking.deleted_at.is_none() => {
                booking.status = status;
                booking.updated_at = updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
