//! Driven port for focus-time persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FocusTimeSession, MonthWindow, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by focus-time repository adapters.
    pub enum FocusTimeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "focus time repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "focus time repository query failed: {message}",
    }
}

/// Port for reading and writing focus-time sessions of a single owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FocusTimeRepository: Send + Sync {
    async fn create(&self, session: &FocusTimeSession) -> Result<(), FocusTimeRepositoryError>;

    /// All sessions of `owner`, ordered by `time_from` ascending.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError>;

    /// Sessions of `owner` whose `time_from` lies inside `window`, bounds
    /// included, ordered by `time_from` ascending.
    async fn list_started_within(
        &self,
        owner: &UserId,
        window: &MonthWindow,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError>;

    /// Remove a session; `Ok(false)` when no owned session matched.
    async fn delete_for_owner(
        &self,
        owner: &UserId,
        session_id: &Uuid,
    ) -> Result<bool, FocusTimeRepositoryError>;
}

/// Fixture implementation for tests that do not exercise focus-time storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFocusTimeRepository;

#[async_trait]
impl FocusTimeRepository for FixtureFocusTimeRepository {
    async fn create(&self, _session: &FocusTimeSession) -> Result<(), FocusTimeRepositoryError> {
        Ok(())
    }

    async fn list_for_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_started_within(
        &self,
        _owner: &UserId,
        _window: &MonthWindow,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete_for_owner(
        &self,
        _owner: &UserId,
        _session_id: &Uuid,
    ) -> Result<bool, FocusTimeRepositoryError> {
        Ok(false)
    }
}
