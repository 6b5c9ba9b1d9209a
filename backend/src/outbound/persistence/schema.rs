//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Habits owned by a single user.
    ///
    /// `(user_id, name)` is unique.
    habits (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        /// Start-of-day instants in the order they were marked.
        completed_dates -> Array<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recorded focus-time sessions.
    focus_time_sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        time_from -> Timestamptz,
        time_to -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(habits, focus_time_sessions);
