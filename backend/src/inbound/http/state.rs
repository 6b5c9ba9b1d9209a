//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FocusTimeCommand, FocusTimeQuery, HabitCommand, HabitQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub focus_time: Arc<dyn FocusTimeCommand>,
    pub focus_time_query: Arc<dyn FocusTimeQuery>,
}

impl HttpState {
    /// Build state from services that implement both halves of each port
    /// pair.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use habit_tracker::domain::ports::{
    ///     FixtureFocusTimeRepository, FixtureHabitRepository, StaticLoginService,
    /// };
    /// use habit_tracker::domain::{Calendar, FocusTimeService, HabitService};
    /// use habit_tracker::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_services(
    ///     Arc::new(StaticLoginService::default()),
    ///     Arc::new(HabitService::new(
    ///         Arc::new(FixtureHabitRepository),
    ///         Arc::new(DefaultClock),
    ///         Calendar::utc(),
    ///     )),
    ///     Arc::new(FocusTimeService::new(
    ///         Arc::new(FixtureFocusTimeRepository),
    ///         Arc::new(DefaultClock),
    ///         Calendar::utc(),
    ///     )),
    /// );
    /// let _habits = state.habits.clone();
    /// ```
    pub fn from_services<H, F>(login: Arc<dyn LoginService>, habits: Arc<H>, focus: Arc<F>) -> Self
    where
        H: HabitCommand + HabitQuery + 'static,
        F: FocusTimeCommand + FocusTimeQuery + 'static,
    {
        Self {
            login,
            habits: habits.clone(),
            habits_query: habits,
            focus_time: focus.clone(),
            focus_time_query: focus,
        }
    }
}
