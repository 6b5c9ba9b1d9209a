//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod focus_time_command;
mod focus_time_query;
mod focus_time_repository;
mod habit_command;
mod habit_query;
mod habit_repository;
mod login_service;

pub use focus_time_command::{CreateFocusTimeRequest, FocusTimeCommand, FocusTimeRef};
#[cfg(test)]
pub use focus_time_command::MockFocusTimeCommand;
pub use focus_time_query::{FocusTimeMetricsRequest, FocusTimeQuery};
#[cfg(test)]
pub use focus_time_query::MockFocusTimeQuery;
#[cfg(test)]
pub use focus_time_repository::MockFocusTimeRepository;
pub use focus_time_repository::{
    FixtureFocusTimeRepository, FocusTimeRepository, FocusTimeRepositoryError,
};
#[cfg(test)]
pub use habit_command::MockHabitCommand;
pub use habit_command::{CreateHabitRequest, HabitCommand, HabitRef};
#[cfg(test)]
pub use habit_query::MockHabitQuery;
pub use habit_query::{HabitMetricsRequest, HabitQuery};
#[cfg(test)]
pub use habit_repository::MockHabitRepository;
pub use habit_repository::{FixtureHabitRepository, HabitRepository, HabitRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{DEFAULT_ADMIN_USER_ID, LoginService, StaticAccount, StaticLoginService};
