//! PostgreSQL-backed `FocusTimeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{FocusTimeRepository, FocusTimeRepositoryError};
use crate::domain::{FocusTimeDraft, FocusTimeSession, MonthWindow, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FocusTimeRow, NewFocusTimeRow};
use super::pool::{DbPool, PoolError};
use super::schema::focus_time_sessions;

/// Diesel-backed implementation of the `FocusTimeRepository` port.
#[derive(Clone)]
pub struct DieselFocusTimeRepository {
    pool: DbPool,
}

impl DieselFocusTimeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FocusTimeRepositoryError {
    map_basic_pool_error(error, FocusTimeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FocusTimeRepositoryError {
    map_basic_diesel_error(
        error,
        FocusTimeRepositoryError::query,
        FocusTimeRepositoryError::connection,
    )
}

fn row_to_session(row: FocusTimeRow) -> Result<FocusTimeSession, FocusTimeRepositoryError> {
    let id = row.id;
    FocusTimeSession::new(FocusTimeDraft {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        time_from: row.time_from,
        time_to: row.time_to,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| {
        warn!(session_id = %id, error = %err, "stored focus time interval is invalid");
        FocusTimeRepositoryError::query(format!("stored focus time interval is invalid: {err}"))
    })
}

fn rows_to_sessions(
    rows: Vec<FocusTimeRow>,
) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
    rows.into_iter().map(row_to_session).collect()
}

#[async_trait]
impl FocusTimeRepository for DieselFocusTimeRepository {
    async fn create(&self, session: &FocusTimeSession) -> Result<(), FocusTimeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFocusTimeRow {
            id: session.id(),
            user_id: *session.user_id().as_uuid(),
            time_from: session.time_from(),
            time_to: session.time_to(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        };
        diesel::insert_into(focus_time_sessions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FocusTimeRow> = focus_time_sessions::table
            .filter(focus_time_sessions::user_id.eq(owner.as_uuid()))
            .order((
                focus_time_sessions::time_from.asc(),
                focus_time_sessions::id.asc(),
            ))
            .select(FocusTimeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_sessions(rows)
    }

    async fn list_started_within(
        &self,
        owner: &UserId,
        window: &MonthWindow,
    ) -> Result<Vec<FocusTimeSession>, FocusTimeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FocusTimeRow> = focus_time_sessions::table
            .filter(focus_time_sessions::user_id.eq(owner.as_uuid()))
            .filter(focus_time_sessions::time_from.ge(window.start()))
            .filter(focus_time_sessions::time_from.le(window.end()))
            .order(focus_time_sessions::time_from.asc())
            .select(FocusTimeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_sessions(rows)
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        session_id: &Uuid,
    ) -> Result<bool, FocusTimeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            focus_time_sessions::table
                .filter(focus_time_sessions::id.eq(session_id))
                .filter(focus_time_sessions::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
