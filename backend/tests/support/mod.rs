//! Shared helpers for HTTP integration tests.
//!
//! The app is assembled from the library's public router with in-memory
//! repositories, so these tests run without PostgreSQL.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use habit_tracker::Trace;
use habit_tracker::domain::Calendar;
use habit_tracker::domain::UserId;
use habit_tracker::domain::ports::{StaticAccount, StaticLoginService};
use habit_tracker::inbound::http::configure_api;
use habit_tracker::inbound::http::health::{HealthState, live, ready};
use habit_tracker::test_support::{MutableClock, in_memory_http_state};

pub const ALICE: (&str, &str) = ("alice", "alice-secret");
pub const BOB: (&str, &str) = ("bob", "bob-secret");

/// Friday 2024-03-15 13:45 UTC.
pub fn friday_afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 13, 45, 0)
        .single()
        .expect("valid timestamp")
}

/// Login service with two independent owners.
pub fn two_owners() -> StaticLoginService {
    StaticLoginService::new([
        StaticAccount::new(ALICE.0, ALICE.1, UserId::random()),
        StaticAccount::new(BOB.0, BOB.1, UserId::random()),
    ])
}

/// Full application over in-memory storage driven by `clock`.
pub fn app(
    clock: Arc<MutableClock>,
    calendar: Calendar,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = in_memory_http_state(two_owners(), clock, calendar);
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(health))
        .wrap(
            SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                .cookie_name("session".to_owned())
                .cookie_secure(false)
                .build(),
        )
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure_api)
}

/// Log in and return the session cookie.
pub async fn login<S>(app: &S, (username, password): (&str, &str)) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed for {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
