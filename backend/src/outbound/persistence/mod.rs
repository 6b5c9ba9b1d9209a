//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) never
//! leave this module. Connections come from a `bb8` pool driven by
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use habit_tracker::outbound::persistence::{DbPool, DieselHabitRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/habits")).await?;
//! let habits = DieselHabitRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_focus_time_repository;
mod diesel_habit_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_focus_time_repository::DieselFocusTimeRepository;
pub use diesel_habit_repository::DieselHabitRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
