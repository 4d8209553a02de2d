use crate::domain::{FieldId, NewSchedule, Schedule, ScheduleId};
use crate::ports::Result;
use crate::ports::schedule_repository::ScheduleRepository as ScheduleRepositoryTrait;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct State {
    next_id: u64,
    schedules: BTreeMap<ScheduleId, Schedule>,
}

/// In-memory implementation of ScheduleRepository
///
/// Deleted schedules stay in the map with `deleted_at` set.
pub struct ScheduleRepository {
    state: Mutex<State>,
}

impl ScheduleRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a schedule as-is for testing purposes
    pub fn insert(&self, schedule: Schedule) {
        let mut state = self.state();
        state.next_id = state.next_id.max(schedule.schedule_id.value());
        state.schedules.insert(schedule.schedule_id, schedule);
    }

    /// Look up a schedule including soft-deleted ones
    pub fn get_raw(&self, schedule_id: ScheduleId) -> Option<Schedule> {
        self.state().schedules.get(&schedule_id).cloned()
    }
}

impl Default for ScheduleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleRepositoryTrait for ScheduleRepository {
    async fn find_by_id(&self, schedule_id: ScheduleId) -> Result<Option<Schedule>> {
        Ok(self
            .state()
            .schedules
            .get(&schedule_id)
            .filter(|s| s.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_field_id(&self, field_id: FieldId) -> Result<Vec<Schedule>> {
        let mut schedules: Vec<Schedule> = self
            .state()
            .schedules
            .values()
            .filter(|s| s.field_id == field_id && s.deleted_at.is_none())
            .cloned()
            .collect();
        schedules.sort_by_key(|s| (s.day_of_week, s.start_time, s.schedule_id));
        Ok(schedules)
    }

    async fn create(&self, schedule: NewSchedule) -> Result<Schedule> {
        let mut state = self.state();
        state.next_id += 1;
        let now = Utc::now();
        let stored = Schedule {
            schedule_id: ScheduleId::new(state.next_id),
            field_id: schedule.field_id,
            venue_id: schedule.venue_id,
            day_of_week: schedule.day_of_week,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            price: schedule.price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.schedules.insert(stored.schedule_id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, schedule: &Schedule) -> Result<bool> {
        let mut state = self.state();
        match state.schedules.get_mut(&schedule.schedule_id) {
            Some(stored) if stored.deleted_at.is_none() => {
                *stored = Schedule {
                    created_at: stored.created_at,
                    deleted_at: None,
                    ..schedule.clone()
                };
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, schedule_id: ScheduleId, deleted_at: DateTime<Utc>) -> Result<bool> {
        let mut state = self.state();
        match state.schedules.get_mut(&schedule_id) {
            Some(stored) if stored.deleted_at.is_none() => {
                stored.deleted_at = Some(deleted_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
