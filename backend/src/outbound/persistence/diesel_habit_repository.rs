//! PostgreSQL-backed `HabitRepository` implementation using Diesel ORM.
//!
//! Completion toggles run as a single `UPDATE ... RETURNING` so the
//! membership test and the array rewrite see the same row version.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{HabitRepository, HabitRepositoryError};
use crate::domain::{Habit, HabitDraft, HabitName, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{HabitRow, NewHabitRow};
use super::pool::{DbPool, PoolError};
use super::schema::habits;

const TOGGLE_COMPLETION_SQL: &str = "\
UPDATE habits
SET completed_dates = CASE
        WHEN $1 = ANY(completed_dates) THEN array_remove(completed_dates, $1)
        ELSE array_append(completed_dates, $1)
    END,
    updated_at = $2
WHERE id = $3 AND user_id = $4
RETURNING id, user_id, name, completed_dates, created_at, updated_at";

/// Diesel-backed implementation of the `HabitRepository` port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitRepositoryError {
    map_basic_pool_error(error, HabitRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HabitRepositoryError {
    map_basic_diesel_error(
        error,
        HabitRepositoryError::query,
        HabitRepositoryError::connection,
    )
}

/// Convert a database row into a domain habit.
///
/// Rows whose stored name no longer validates are reported as query errors
/// rather than silently repaired.
fn row_to_habit(row: HabitRow) -> Result<Habit, HabitRepositoryError> {
    let name = HabitName::new(&row.name).map_err(|err| {
        warn!(habit_id = %row.id, error = %err, "stored habit name is invalid");
        HabitRepositoryError::query(format!("stored habit name is invalid: {err}"))
    })?;
    Ok(Habit::new(HabitDraft {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        name,
        completed_dates: row.completed_dates,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn rows_to_habits(rows: Vec<HabitRow>) -> Result<Vec<Habit>, HabitRepositoryError> {
    rows.into_iter().map(row_to_habit).collect()
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn create(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewHabitRow {
            id: habit.id(),
            user_id: *habit.user_id().as_uuid(),
            name: habit.name().as_ref(),
            completed_dates: habit.completed_dates(),
            created_at: habit.created_at(),
            updated_at: habit.updated_at(),
        };

        diesel::insert_into(habits::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    HabitRepositoryError::duplicate_name(habit.name().as_ref())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HabitRow> = habits::table
            .filter(habits::user_id.eq(owner.as_uuid()))
            .order((habits::name.asc(), habits::created_at.asc()))
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_habits(rows)
    }

    async fn find_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HabitRow> = habits::table
            .filter(habits::id.eq(habit_id))
            .filter(habits::user_id.eq(owner.as_uuid()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_habit).transpose()
    }

    async fn find_by_name(
        &self,
        owner: &UserId,
        name: &HabitName,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HabitRow> = habits::table
            .filter(habits::user_id.eq(owner.as_uuid()))
            .filter(habits::name.eq(name.as_ref()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_habit).transpose()
    }

    async fn delete_for_owner(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
    ) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            habits::table
                .filter(habits::id.eq(habit_id))
                .filter(habits::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn toggle_completion(
        &self,
        owner: &UserId,
        habit_id: &Uuid,
        day: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HabitRow> = diesel::sql_query(TOGGLE_COMPLETION_SQL)
            .bind::<Timestamptz, _>(day)
            .bind::<Timestamptz, _>(updated_at)
            .bind::<SqlUuid, _>(*habit_id)
            .bind::<SqlUuid, _>(*owner.as_uuid())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_habit).transpose()
    }
}
