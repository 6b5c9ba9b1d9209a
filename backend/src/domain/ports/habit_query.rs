//! Driving port for habit reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Habit, HabitMonthMetrics, MetricsDate, UserId};

/// Request for a habit's completions within one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitMetricsRequest {
    pub user_id: UserId,
    pub habit_id: Uuid,
    pub date: MetricsDate,
}

/// Driving port for habit read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitQuery: Send + Sync {
    /// Habits of `user_id`, sorted by name.
    async fn list_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, Error>;

    /// Completions of one habit inside the month containing `request.date`.
    async fn month_metrics(&self, request: HabitMetricsRequest)
    -> Result<HabitMonthMetrics, Error>;
}
