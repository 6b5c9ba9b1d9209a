//! Focus-time domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    CreateFocusTimeRequest, FocusTimeCommand, FocusTimeMetricsRequest, FocusTimeQuery,
    FocusTimeRef, FocusTimeRepository, FocusTimeRepositoryError,
};
use crate::domain::{
    Calendar, Error, FocusTimeDayBucket, FocusTimeDraft, FocusTimeSession, UserId,
    daily_focus_buckets,
};

fn map_repository_error(error: FocusTimeRepositoryError) -> Error {
    match error {
        FocusTimeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("focus time repository unavailable: {message}"))
        }
        FocusTimeRepositoryError::Query { message } => {
            Error::internal(format!("focus time repository error: {message}"))
        }
    }
}

/// Focus-time service implementing [`FocusTimeCommand`] and [`FocusTimeQuery`].
#[derive(Clone)]
pub struct FocusTimeService<R> {
    focus_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    calendar: Calendar,
}

impl<R> FocusTimeService<R> {
    pub fn new(focus_repo: Arc<R>, clock: Arc<dyn Clock>, calendar: Calendar) -> Self {
        Self {
            focus_repo,
            clock,
            calendar,
        }
    }
}

#[async_trait]
impl<R> FocusTimeCommand for FocusTimeService<R>
where
    R: FocusTimeRepository,
{
    async fn create_session(
        &self,
        request: CreateFocusTimeRequest,
    ) -> Result<FocusTimeSession, Error> {
        let now = self.clock.utc();
        let session = FocusTimeSession::new(FocusTimeDraft {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            time_from: request.time_from,
            time_to: request.time_to,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| {
            Error::validation(err.to_string()).with_details(json!({
                "fields": [{
                    "field": "timeTo",
                    "message": err.to_string(),
                    "code": "ends_before_start",
                }],
            }))
        })?;

        self.focus_repo
            .create(&session)
            .await
            .map_err(map_repository_error)?;
        Ok(session)
    }

    async fn delete_session(&self, request: FocusTimeRef) -> Result<(), Error> {
        let deleted = self
            .focus_repo
            .delete_for_owner(&request.user_id, &request.session_id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "focus time session {} not found",
                request.session_id
            )))
        }
    }
}

#[async_trait]
impl<R> FocusTimeQuery for FocusTimeService<R>
where
    R: FocusTimeRepository,
{
    async fn list_sessions(&self, user_id: &UserId) -> Result<Vec<FocusTimeSession>, Error> {
        self.focus_repo
            .list_for_owner(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn month_metrics(
        &self,
        request: FocusTimeMetricsRequest,
    ) -> Result<Vec<FocusTimeDayBucket>, Error> {
        let window = self
            .calendar
            .month_window_for(request.date)
            .ok_or_else(|| Error::validation("date is outside the supported range"))?;
        let sessions = self
            .focus_repo
            .list_started_within(&request.user_id, &window)
            .await
            .map_err(map_repository_error)?;
        Ok(daily_focus_buckets(&sessions, &self.calendar, &window))
    }
}
