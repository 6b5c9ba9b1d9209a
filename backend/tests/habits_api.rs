//! End-to-end habit behaviour through the public HTTP router.

mod support;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::TimeDelta;
use rstest::rstest;
use serde_json::{Value, json};

use habit_tracker::domain::Calendar;
use habit_tracker::test_support::MutableClock;
use support::{ALICE, BOB, app, friday_afternoon, login};

async fn send<S>(app: &S, request: test::TestRequest, cookie: &Cookie<'static>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, request.cookie(cookie.clone()).to_request()).await
}

async fn create_habit<S>(app: &S, cookie: &Cookie<'static>, name: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(
        app,
        test::TestRequest::post()
            .uri("/habits")
            .set_json(json!({ "name": name })),
        cookie,
    )
    .await
}

async fn habit_id<S>(app: &S, cookie: &Cookie<'static>, name: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = create_habit(app, cookie, name).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    body["id"].as_str().expect("habit id").to_owned()
}

async fn toggle<S>(app: &S, cookie: &Cookie<'static>, id: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = send(
        app,
        test::TestRequest::patch().uri(&format!("/habits/{id}/toggle")),
        cookie,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    test::read_body_json(res).await
}

#[actix_web::test]
async fn duplicate_names_conflict_only_within_one_owner() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock, Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let bob = login(&app, BOB).await;

    assert_eq!(create_habit(&app, &alice, "Read").await.status(), StatusCode::CREATED);

    let clash = create_habit(&app, &alice, "  Read ").await;
    assert_eq!(clash.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(clash).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "habit_name_taken");

    assert_eq!(create_habit(&app, &bob, "Read").await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn toggling_twice_restores_the_original_dates() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock, Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let id = habit_id(&app, &alice, "Stretch").await;

    let marked = toggle(&app, &alice, &id).await;
    assert_eq!(marked["completedDates"], json!(["2024-03-15T00:00:00Z"]));

    let unmarked = toggle(&app, &alice, &id).await;
    assert_eq!(unmarked["completedDates"], json!([]));
}

#[actix_web::test]
async fn toggles_follow_the_clock_across_days() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock.clone(), Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let id = habit_id(&app, &alice, "Walk").await;

    toggle(&app, &alice, &id).await;
    clock.advance(TimeDelta::days(1));
    let both = toggle(&app, &alice, &id).await;

    assert_eq!(
        both["completedDates"],
        json!(["2024-03-15T00:00:00Z", "2024-03-16T00:00:00Z"])
    );
}

#[actix_web::test]
async fn day_boundaries_follow_the_reference_offset() {
    // 13:45 UTC is already Saturday in UTC+11.
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let calendar = Calendar::with_offset_minutes(11 * 60).expect("valid offset");
    let app = test::init_service(app(clock, calendar)).await;
    let alice = login(&app, ALICE).await;
    let id = habit_id(&app, &alice, "Journal").await;

    let marked = toggle(&app, &alice, &id).await;

    assert_eq!(marked["completedDates"], json!(["2024-03-15T13:00:00Z"]));
}

#[rstest]
#[case("2024-03-01", 2)]
#[case("2024-03-31T23:59:59Z", 2)]
#[case("2024-02-10", 1)]
#[case("2024-04-01", 0)]
#[actix_web::test]
async fn metrics_cover_exactly_one_month(#[case] date: &str, #[case] expected: usize) {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock.clone(), Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let id = habit_id(&app, &alice, "Meditate").await;

    // Completions on Feb 29, Mar 1 and Mar 31.
    clock.set(friday_afternoon() - TimeDelta::days(15));
    toggle(&app, &alice, &id).await;
    clock.set(friday_afternoon() - TimeDelta::days(14));
    toggle(&app, &alice, &id).await;
    clock.set(friday_afternoon() + TimeDelta::days(16));
    toggle(&app, &alice, &id).await;

    let res = send(
        &app,
        test::TestRequest::get().uri(&format!("/habits/{id}/metrics?date={date}")),
        &alice,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Meditate");
    assert_eq!(
        body["completedDates"].as_array().expect("dates").len(),
        expected
    );
}

#[rstest]
#[case("-262143-01-15")]
#[case("%2B262142-12-15")]
#[case("0000-12-31T23:00:00Z")]
#[case("10000-01-01")]
#[actix_web::test]
async fn metrics_reject_years_outside_the_supported_range(#[case] date: &str) {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let calendar = Calendar::with_offset_minutes(120).expect("valid offset");
    let app = test::init_service(app(clock, calendar)).await;
    let alice = login(&app, ALICE).await;
    let id = habit_id(&app, &alice, "Stretch").await;

    let res = send(
        &app,
        test::TestRequest::get().uri(&format!("/habits/{id}/metrics?date={date}")),
        &alice,
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["fields"][0]["field"], "date");
    assert_eq!(body["details"]["fields"][0]["code"], "invalid_date");
}

#[actix_web::test]
async fn deleted_habits_disappear_and_repeat_deletes_are_not_found() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock, Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let keep = habit_id(&app, &alice, "Keep").await;
    let drop = habit_id(&app, &alice, "Drop").await;

    let first = send(
        &app,
        test::TestRequest::delete().uri(&format!("/habits/{drop}")),
        &alice,
    )
    .await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = send(
        &app,
        test::TestRequest::delete().uri(&format!("/habits/{drop}")),
        &alice,
    )
    .await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let listed = send(&app, test::TestRequest::get().uri("/habits"), &alice).await;
    let body: Value = test::read_body_json(listed).await;
    let ids: Vec<_> = body
        .as_array()
        .expect("habit list")
        .iter()
        .filter_map(|habit| habit["id"].as_str())
        .collect();
    assert_eq!(ids, vec![keep.as_str()]);
}

#[actix_web::test]
async fn owners_cannot_reach_each_others_habits() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock, Calendar::utc())).await;
    let alice = login(&app, ALICE).await;
    let bob = login(&app, BOB).await;
    let id = habit_id(&app, &alice, "Private").await;

    for request in [
        test::TestRequest::patch().uri(&format!("/habits/{id}/toggle")),
        test::TestRequest::delete().uri(&format!("/habits/{id}")),
        test::TestRequest::get().uri(&format!("/habits/{id}/metrics?date=2024-03-01")),
    ] {
        assert_eq!(send(&app, request, &bob).await.status(), StatusCode::NOT_FOUND);
    }

    let listed = send(&app, test::TestRequest::get().uri("/habits"), &bob).await;
    let body: Value = test::read_body_json(listed).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn responses_carry_a_trace_id() {
    let clock = Arc::new(MutableClock::new(friday_afternoon()));
    let app = test::init_service(app(clock, Calendar::utc())).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/habits").to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header);
}
