//! Driven port for habit persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Habit, HabitName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by habit repository adapters.
    pub enum HabitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "habit repository query failed: {message}",
        /// The owner already has a habit with this name.
        DuplicateName { name: String } =>
            "a habit named {name} already exists",
    }
}

/// Port for reading and writing habits.
///
/// Every operation is scoped to an owner; adapters must never return or
/// mutate another user's habits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Insert a new habit.
    ///
    /// Returns [`HabitRepositoryError::DuplicateName`] when the owner already
    /// has a habit with the same name.
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError>;

    /// All habits of `owner`, sorted by name ascending.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError>;

    async fn find_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError>;

    async fn find_by_name(
        &self,
        owner: &UserId,
        name: &HabitName,
    ) -> Result<Option<Habit>, HabitRepositoryError>;

    /// Remove a habit; `Ok(false)` when no owned habit matched.
    async fn delete_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError>;

    /// Atomically add `day` to, or remove it from, the habit's completions.
    ///
    /// The read-compare-write happens as one indivisible step so concurrent
    /// toggles of the same habit cannot both append or both remove. Returns
    /// `Ok(None)` when no owned habit matched.
    async fn toggle_completion(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
        day: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Habit>, HabitRepositoryError>;
}

/// Fixture implementation for tests that do not exercise habit persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitRepository;

#[async_trait]
impl HabitRepository for FixtureHabitRepository {
    async fn create(&self, _habit: &Habit) -> Result<(), HabitRepositoryError> {
        Ok(())
    }

    async fn list_for_owner(&self, _owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_for_owner(
        &self,
        _owner: &UserId,
        _habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(None)
    }

    async fn find_by_name(
        &self,
        _owner: &UserId,
        _name: &HabitName,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(None)
    }

    async fn delete_for_owner(
        &self,
        _owner: &UserId,
        _habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError> {
        Ok(false)
    }

    async fn toggle_completion(
        &self,
        _owner: &UserId,
        _habit_id: &Uuid,
        _day: DateTime<Utc>,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_find_nothing() {
        let repo = FixtureHabitRepository;
        let owner = UserId::random();
        assert!(
            repo.find_for_owner(&owner, &Uuid::new_v4())
                .await
                .expect("fixture lookup")
                .is_none()
        );
        assert!(
            repo.list_for_owner(&owner)
                .await
                .expect("fixture list")
                .is_empty()
        );
        assert!(
            !repo
                .delete_for_owner(&owner, &Uuid::new_v4())
                .await
                .expect("fixture delete")
        );
    }

    #[rstest]
    fn duplicate_name_error_mentions_name() {
        let err = HabitRepositoryError::duplicate_name("Read");
        assert_eq!(err.to_string(), "a habit named Read already exists");
    }
}
