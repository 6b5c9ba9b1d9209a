//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use habit_tracker::domain::ports::StaticLoginService;
use habit_tracker::domain::{FocusTimeService, HabitService};
use habit_tracker::inbound::http::state::HttpState;
use habit_tracker::outbound::persistence::{DieselFocusTimeRepository, DieselHabitRepository};

use super::ServerConfig;

/// Build the HTTP state backed by the PostgreSQL repositories.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let habits = HabitService::new(
        Arc::new(DieselHabitRepository::new(config.db_pool.clone())),
        config.clock.clone(),
        config.calendar,
    );
    let focus_time = FocusTimeService::new(
        Arc::new(DieselFocusTimeRepository::new(config.db_pool.clone())),
        config.clock.clone(),
        config.calendar,
    );
    HttpState::from_services(
        Arc::new(StaticLoginService::default()),
        Arc::new(habits),
        Arc::new(focus_time),
    )
}
