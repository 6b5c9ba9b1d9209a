//! In-memory adapters and clocks for tests.
//!
//! Enabled for the crate's own tests and, through the `test-support` feature,
//! for integration tests that drive the HTTP surface without PostgreSQL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    FocusTimeRepository, FocusTimeRepositoryError, HabitRepository, HabitRepositoryError,
    LoginService, StaticLoginService,
};
use crate::domain::{
    Calendar, FocusTimeService, FocusTimeSession, Habit, HabitName, HabitService, MonthWindow,
    UserId,
};
use crate::inbound::http::state::HttpState;

/// Clock whose current instant tests can move.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Habit repository backed by a mutex-guarded map.
///
/// Toggles run under the lock, matching the single-statement update of the
/// PostgreSQL adapter.
#[derive(Default)]
pub struct InMemoryHabitRepository {
    habits: Mutex<HashMap<Uuid, Habit>>,
}

impl InMemoryHabitRepository {
    fn store(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Habit>>, HabitRepositoryError> {
        self.habits
            .lock()
            .map_err(|_| HabitRepositoryError::query("habit store lock poisoned"))
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let mut store = self.store()?;
        let taken = store
            .values()
            .any(|existing| existing.user_id() == habit.user_id() && existing.name() == habit.name());
        if taken {
            return Err(HabitRepositoryError::duplicate_name(habit.name().as_ref()));
        }
        store.insert(habit.id(), habit.clone());
        Ok(())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut habits: Vec<Habit> = self
            .store()?
            .values()
            .filter(|habit| habit.user_id() == owner)
            .cloned()
            .collect();
        habits.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(habits)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(self
            .store()?
            .get(habit_id)
            .filter(|habit| habit.user_id() == owner)
            .cloned())
    }

    async fn find_by_name(
        &self,
        owner: &UserId,
        name: &HabitName,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(self
            .store()?
            .values()
            .find(|habit| habit.user_id() == owner && habit.name() == name)
            .cloned())
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError> {
        let mut store = self.store()?;
        let owned = store
            .get(habit_id)
            .is_some_and(|habit| habit.user_id() == owner);
        if owned {
            store.remove(habit_id);
        }
        Ok(owned)
    }

    async fn toggle_completion(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
        day: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut store = self.store()?;
        let Some(habit) = store
            .get_mut(habit_id)
            .filter(|habit| habit.user_id() == owner)
        else {
            return Ok(None);
        };
        habit.toggle_completion(day, updated_at);
        Ok(Some(habit.clone()))
    }
}

/// Focus-time repository backed by a mutex-guarded vector.
#[derive(Default)]
pub struct InMemoryFocusTimeRepository {
    sessions: Mutex<Vec<FocusTimeSession>>,
}

impl InMemoryFocusTimeRepository {
    fn store(&self) -> Result<MutexGuard<'_, Vec<FocusTimeSession>>, FocusTimeRepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| FocusTimeRepositoryError::query("focus time store lock poisoned"))
    }

    fn owned_sorted(
        &self,
        owner: &UserId,
        keep: impl Fn(&FocusTimeSession) -> bool,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        let mut sessions: Vec<_> = self
            .store()?
            .iter()
            .filter(|session| session.user_id() == owner && keep(session))
            .cloned()
            .collect();
        sessions.sort_by_key(FocusTimeSession::time_from);
        Ok(sessions)
    }
}

#[async_trait]
impl FocusTimeRepository for InMemoryFocusTimeRepository {
    async fn create(&self, session: &FocusTimeSession) -> Result<(), FocusTimeRepositoryError> {
        self.store()?.push(session.clone());
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        self.owned_sorted(owner, |_| true)
    }

    async fn list_started_within(
        &self,
        owner: &UserId,
        window: &MonthWindow,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        self.owned_sorted(owner, |session| window.contains(session.time_from()))
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        session_id: &Uuid,
    ) -> Result<bool, FocusTimeRepositoryError> {
        let mut store = self.store()?;
        let before = store.len();
        store.retain(|session| !(session.id() == *session_id && session.user_id() == owner));
        Ok(store.len() != before)
    }
}

/// HTTP state wired to fresh in-memory repositories.
pub fn in_memory_http_state(
    login: StaticLoginService,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
) -> HttpState {
    let login: Arc<dyn LoginService> = Arc::new(login);
    HttpState::from_services(
        login,
        Arc::new(HabitService::new(
            Arc::new(InMemoryHabitRepository::default()),
            clock.clone(),
            calendar,
        )),
        Arc::new(FocusTimeService::new(
            Arc::new(InMemoryFocusTimeRepository::default()),
            clock,
            calendar,
        )),
    )
}
