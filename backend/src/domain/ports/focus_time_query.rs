//! Driving port for focus-time reads.

use async_trait::async_trait;

use crate::domain::{Error, FocusTimeDayBucket, FocusTimeSession, MetricsDate, UserId};

/// Request for daily focus-time totals within one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimeMetricsRequest {
    pub user_id: UserId,
    pub date: MetricsDate,
}

/// Driving port for focus-time read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FocusTimeQuery: Send + Sync {
    /// Sessions of `user_id` ordered by start.
    async fn list_sessions(&self, user_id: &UserId) -> Result<Vec<FocusTimeSession>, Error>;

    /// One bucket per day with at least one session starting that day, in
    /// ascending day order.
    async fn month_metrics(
        &self,
        request: FocusTimeMetricsRequest,
    ) -> Result<Vec<FocusTimeDayBucket>, Error>;
}
