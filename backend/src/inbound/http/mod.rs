//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod focus_time;
pub mod habits;
pub mod health;
pub mod schemas;
pub mod service_info;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the REST surface and its extractor error handlers.
///
/// Application state ([`state::HttpState`]) and session middleware are
/// supplied by the caller. Health probes are registered separately because
/// they carry their own state.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(service_info::service_info)
        .service(users::login)
        .service(habits::list_habits)
        .service(habits::create_habit)
        .service(habits::delete_habit)
        .service(habits::toggle_habit)
        .service(habits::habit_metrics)
        .service(focus_time::create_focus_time)
        .service(focus_time::list_focus_time)
        // Before `/focus-time/{id}` so "metrics" is never read as an id.
        .service(focus_time::focus_time_metrics)
        .service(focus_time::delete_focus_time);
}
