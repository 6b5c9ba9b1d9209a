//! Habit domain service.
//!
//! Implements the habit driving ports on top of a [`HabitRepository`],
//! resolving "today" and month windows through the injected clock and
//! reference [`Calendar`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    CreateHabitRequest, HabitCommand, HabitMetricsRequest, HabitQuery, HabitRef, HabitRepository,
    HabitRepositoryError,
};
use crate::domain::{Calendar, Error, Habit, HabitDraft, HabitMonthMetrics, HabitName, UserId};

/// Details code attached to name-conflict errors.
pub const HABIT_NAME_TAKEN: &str = "habit_name_taken";

fn name_taken(name: &str) -> Error {
    Error::invalid_request(format!("a habit named {name} already exists")).with_details(json!({
        "code": HABIT_NAME_TAKEN,
        "name": name,
    }))
}

fn not_found(habit_id: Uuid) -> Error {
    Error::not_found(format!("habit {habit_id} not found"))
}

fn map_repository_error(error: HabitRepositoryError) -> Error {
    match error {
        HabitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("habit repository unavailable: {message}"))
        }
        HabitRepositoryError::Query { message } => {
            Error::internal(format!("habit repository error: {message}"))
        }
        HabitRepositoryError::DuplicateName { name } => name_taken(&name),
    }
}

/// Habit service implementing [`HabitCommand`] and [`HabitQuery`].
#[derive(Clone)]
pub struct HabitService<R> {
    habit_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
}

impl<R> HabitService<R> {
    /// Create a habit service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use habit_tracker::domain::{Calendar, HabitService};
    /// # use habit_tracker::domain::ports::FixtureHabitRepository;
    /// # use mockable::DefaultClock;
    /// let service = HabitService::new(
    ///     Arc::new(FixtureHabitRepository),
    ///     Arc::new(DefaultClock),
    ///     Calendar::utc(),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(habit_repo: Arc<R>, clock: Arc<dyn Clock>, calendar: Calendar) -> Self {
        Self {
            habit_repo,
            clock,
            calendar,
        }
    }
}

impl<R> HabitService<R>
where
    R: HabitRepository,
{
    async fn ensure_name_available(&self, owner: &UserId, name: &HabitName) -> Result<(), Error> {
        let existing = self
            .habit_repo
            .find_by_name(owner, name)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(_) => Err(name_taken(name.as_ref())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R> HabitCommand for HabitService<R>
where
    R: HabitRepository,
{
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error> {
        let CreateHabitRequest { user_id, name } = request;
        self.ensure_name_available(&user_id, &name).await?;

        let now = self.clock.utc();
        let habit = Habit::new(HabitDraft {
            id: Uuid::new_v4(),
            user_id,
            name,
            completed_dates: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        // The unique index still guards against a concurrent create racing
        // past the lookup above.
        self.habit_repo
            .create(&habit)
            .await
            .map_err(map_repository_error)?;
        debug!(habit_id = %habit.id(), "habit created");
        Ok(habit)
    }

    async fn delete_habit(&self, request: HabitRef) -> Result<(), Error> {
        let deleted = self
            .habit_repo
            .delete_for_owner(&request.user_id, &request.habit_id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(request.habit_id))
        }
    }

    async fn toggle_today(&self, request: HabitRef) -> Result<Habit, Error> {
        let now = self.clock.utc();
        let today = self
            .calendar
            .start_of_day(now)
            .ok_or_else(|| Error::internal(format!("start of day for {now} is not representable")))?;
        self.habit_repo
            .toggle_completion(&request.user_id, &request.habit_id, today, now)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(request.habit_id))
    }
}

#[async_trait]
impl<R> HabitQuery for HabitService<R>
where
    R: HabitRepository,
{
    async fn list_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, Error> {
        self.habit_repo
            .list_for_owner(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn month_metrics(
        &self,
        request: HabitMetricsRequest,
    ) -> Result<HabitMonthMetrics, Error> {
        let habit = self
            .habit_repo
            .find_for_owner(&request.user_id, &request.habit_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(request.habit_id))?;
        let window = self
            .calendar
            .month_window_for(request.date)
            .ok_or_else(|| Error::validation("date is outside the supported range"))?;
        Ok(habit.month_metrics(&window))
    }
}

#[cfg(test)]
#[path = "habit_service_tests.rs"]
mod tests;
