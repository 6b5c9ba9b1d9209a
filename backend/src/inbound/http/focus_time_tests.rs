//! Tests for focus-time HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{fixture_state, login_cookie, test_session_middleware};
use crate::inbound::http::users::login;
use crate::inbound::http::validation::{json_config, path_config, query_config};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(fixture_state()))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .wrap(test_session_middleware())
        .service(login)
        .service(create_focus_time)
        .service(list_focus_time)
        .service(focus_time_metrics)
        .service(delete_focus_time)
}

async fn record<S>(app: &S, cookie: &actix_web::cookie::Cookie<'static>, from: &str, to: &str) -> actix_web::dev::ServiceResponse
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/focus-time")
            .cookie(cookie.clone())
            .set_json(json!({"timeFrom": from, "timeTo": to}))
            .to_request(),
    )
    .await
}

#[actix_web::test]
async fn created_sessions_are_listed_by_start() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_cookie(&app, "admin", "password").await;

    let later = record(&app, &cookie, "2024-03-15T14:00:00Z", "2024-03-15T14:30:00Z").await;
    assert_eq!(later.status(), StatusCode::CREATED);
    let earlier = record(&app, &cookie, "2024-03-15T09:00:00Z", "2024-03-15T09:25:00Z").await;
    assert_eq!(earlier.status(), StatusCode::CREATED);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/focus-time")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let sessions: Vec<FocusTimeResponse> = actix_test::read_body_json(listed).await;
    let starts: Vec<_> = sessions.iter().map(|s| s.time_from.to_rfc3339()).collect();
    assert_eq!(
        starts,
        vec!["2024-03-15T09:00:00+00:00", "2024-03-15T14:00:00+00:00"]
    );
}

#[rstest]
#[case(json!({"timeFrom": "2024-03-15T10:00:00Z", "timeTo": "2024-03-15T09:00:00Z"}), vec!["timeTo"])]
#[case(json!({"timeFrom": "yesterday", "timeTo": "2024-03-15T09:00:00Z"}), vec!["timeFrom"])]
#[case(json!({}), vec!["timeFrom", "timeTo"])]
#[actix_web::test]
async fn invalid_intervals_are_unprocessable(#[case] body: Value, #[case] fields: Vec<&str>) {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_cookie(&app, "admin", "password").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/focus-time")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload: Value = actix_test::read_body_json(res).await;
    let reported: Vec<_> = payload["details"]["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(reported, fields);
}

#[actix_web::test]
async fn metrics_bucket_sessions_by_day() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_cookie(&app, "admin", "password").await;
    record(&app, &cookie, "2024-03-02T09:00:00Z", "2024-03-02T09:25:00Z").await;
    record(&app, &cookie, "2024-03-02T15:00:00Z", "2024-03-02T15:05:00Z").await;
    record(&app, &cookie, "2024-03-09T08:00:00Z", "2024-03-09T09:00:00Z").await;
    record(&app, &cookie, "2024-04-01T00:00:00Z", "2024-04-01T00:10:00Z").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/focus-time/metrics?date=2024-03-20")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(
        body,
        json!([
            {"day": "2024-03-02", "count": 2, "totalSeconds": 1800},
            {"day": "2024-03-09", "count": 1, "totalSeconds": 3600}
        ])
    );
}

#[actix_web::test]
async fn delete_twice_reports_not_found() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_cookie(&app, "admin", "password").await;
    let created = record(&app, &cookie, "2024-03-02T09:00:00Z", "2024-03-02T09:25:00Z").await;
    let session: FocusTimeResponse = actix_test::read_body_json(created).await;
    let uri = format!("/focus-time/{}", session.id);

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn metrics_require_login() {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/focus-time/metrics?date=2024-03-20")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
