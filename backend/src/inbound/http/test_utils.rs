//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::Calendar;
use crate::domain::ports::StaticLoginService;
use crate::inbound::http::state::HttpState;
use crate::test_support::{MutableClock, in_memory_http_state};

/// Session middleware with a fresh key, cookie name `session` and no `Secure`
/// flag so plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// 2024-03-15T13:45:00Z, the instant handler tests run at by default.
pub fn fixture_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 3, 15, 13, 45, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp is valid"),
    }
}

/// In-memory state with the default `admin` account and a clock pinned to
/// [`fixture_now`].
pub fn fixture_state() -> HttpState {
    in_memory_http_state(
        StaticLoginService::default(),
        Arc::new(MutableClock::new(fixture_now())),
        Calendar::utc(),
    )
}

/// Log in with the given credentials and return the session cookie.
pub async fn login_cookie<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({"username": username, "password": password}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed");
    match response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
    {
        Some(cookie) => cookie.into_owned(),
        None => panic!("session cookie missing"),
    }
}
