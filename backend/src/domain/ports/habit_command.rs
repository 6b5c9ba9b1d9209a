//! Driving port for habit mutations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Habit, HabitName, UserId};

/// Request to create a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabitRequest {
    pub user_id: UserId,
    pub name: HabitName,
}

/// Request addressing one owned habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitRef {
    pub user_id: UserId,
    pub habit_id: Uuid,
}

/// Driving port for habit write operations.
///
/// Errors carry domain codes: `not_found` for unknown or foreign habits,
/// `invalid_request` for name conflicts, and `service_unavailable` or
/// `internal_error` for storage failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitCommand: Send + Sync {
    /// Create a habit with no completions.
    async fn create_habit(&self, request: CreateHabitRequest) -> Result<Habit, Error>;

    /// Delete an owned habit.
    async fn delete_habit(&self, request: HabitRef) -> Result<(), Error>;

    /// Mark today complete, or un-mark it when already marked.
    async fn toggle_today(&self, request: HabitRef) -> Result<Habit, Error>;
}
