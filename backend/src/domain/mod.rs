//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters and the services that implement the driving ports.
//! Types here never depend on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Habit, HabitName: habits and their completion days.
//! - FocusTimeSession: recorded focus intervals.
//! - Calendar, MonthWindow, MetricsDate: reference-timezone day arithmetic.
//! - HabitService, FocusTimeService: driving port implementations.

pub mod auth;
pub mod calendar;
pub mod error;
pub mod focus_time;
mod focus_time_service;
pub mod habit;
mod habit_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::calendar::{Calendar, CalendarError, MetricsDate, MonthWindow, ParseMetricsDateError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::focus_time::{
    FocusTimeDayBucket, FocusTimeDraft, FocusTimeSession, FocusTimeValidationError,
    daily_focus_buckets,
};
pub use self::focus_time_service::FocusTimeService;
pub use self::habit::{
    CompletionToggle, HABIT_NAME_MAX, Habit, HabitDraft, HabitMonthMetrics, HabitName,
    HabitValidationError,
};
pub use self::habit_service::{HABIT_NAME_TAKEN, HabitService};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use habit_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such habit"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
