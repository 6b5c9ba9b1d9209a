//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{focus_time_sessions, habits};

/// Row struct for reading from the habits table.
///
/// Also loadable by name so raw `RETURNING` statements can produce it.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub completed_dates: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating habit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub(crate) struct NewHabitRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub completed_dates: &'a [DateTime<Utc>],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the focus_time_sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = focus_time_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FocusTimeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_from: DateTime<Utc>,
    pub time_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating focus-time records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = focus_time_sessions)]
pub(crate) struct NewFocusTimeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_from: DateTime<Utc>,
    pub time_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
