//! Driving port for focus-time mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, FocusTimeSession, UserId};

/// Request to record a focus-time session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateFocusTimeRequest {
    pub user_id: UserId,
    pub time_from: DateTime<Utc>,
    pub time_to: DateTime<Utc>,
}

/// Request addressing one owned focus-time session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTimeRef {
    pub user_id: UserId,
    pub session_id: Uuid,
}

/// Driving port for focus-time write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FocusTimeCommand: Send + Sync {
    /// Record a session; `validation_failed` when it ends before it starts.
    async fn create_session(
        &self,
        request: CreateFocusTimeRequest,
    ) -> Result<FocusTimeSession, Error>;

    /// Delete an owned session; `not_found` when absent.
    async fn delete_session(&self, request: FocusTimeRef) -> Result<(), Error>;
}
