//! Focus-time HTTP handlers.
//!
//! ```text
//! POST   /focus-time {"timeFrom":"2024-03-15T09:00:00Z","timeTo":"2024-03-15T09:25:00Z"}
//! GET    /focus-time
//! DELETE /focus-time/{id}
//! GET    /focus-time/metrics?date=2024-03-01
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateFocusTimeRequest, FocusTimeMetricsRequest, FocusTimeRef};
use crate::domain::{Error, FocusTimeDayBucket, FocusTimeSession};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::habits::MetricsQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, FieldName, parse_metrics_date, parse_rfc3339_timestamp, parse_uuid, require,
};

const ID: FieldName = FieldName::new("id");
const TIME_FROM: FieldName = FieldName::new("timeFrom");
const TIME_TO: FieldName = FieldName::new("timeTo");
const DATE: FieldName = FieldName::new("date");

/// Focus-time session as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FocusTimeResponse {
    pub id: Uuid,
    pub time_from: DateTime<Utc>,
    pub time_to: DateTime<Utc>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FocusTimeSession> for FocusTimeResponse {
    fn from(session: FocusTimeSession) -> Self {
        Self {
            id: session.id(),
            time_from: session.time_from(),
            time_to: session.time_to(),
            user_id: *session.user_id().as_uuid(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Focus time accumulated on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FocusTimeDayResponse {
    #[schema(value_type = String, example = "2024-03-15")]
    pub day: NaiveDate,
    pub count: u32,
    pub total_seconds: i64,
}

impl From<FocusTimeDayBucket> for FocusTimeDayResponse {
    fn from(bucket: FocusTimeDayBucket) -> Self {
        Self {
            day: bucket.day,
            count: bucket.count,
            total_seconds: bucket.total_seconds,
        }
    }
}

/// Body of `POST /focus-time`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFocusTimeBody {
    #[schema(example = "2024-03-15T09:00:00Z")]
    pub time_from: Option<String>,
    #[schema(example = "2024-03-15T09:25:00Z")]
    pub time_to: Option<String>,
}

/// Record a focus-time session.
#[utoipa::path(
    post,
    path = "/focus-time",
    request_body = CreateFocusTimeBody,
    responses(
        (status = 201, description = "Session recorded", body = FocusTimeResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 422, description = "Invalid or reversed interval", body = ErrorSchema)
    ),
    tags = ["focus-time"],
    operation_id = "createFocusTime"
)]
#[post("/focus-time")]
pub async fn create_focus_time(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateFocusTimeBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let CreateFocusTimeBody { time_from, time_to } = payload.into_inner();

    let mut errors = FieldErrors::default();
    let time_from = errors.check(
        require(time_from, TIME_FROM).and_then(|raw| parse_rfc3339_timestamp(&raw, TIME_FROM)),
    );
    let time_to = errors.check(
        require(time_to, TIME_TO).and_then(|raw| parse_rfc3339_timestamp(&raw, TIME_TO)),
    );
    errors.into_result()?;
    let (Some(time_from), Some(time_to)) = (time_from, time_to) else {
        return Err(Error::internal("validated focus time fields missing"));
    };

    let created = state
        .focus_time
        .create_session(CreateFocusTimeRequest {
            user_id,
            time_from,
            time_to,
        })
        .await?;
    Ok(HttpResponse::Created().json(FocusTimeResponse::from(created)))
}

/// List the caller's focus-time sessions ordered by start.
#[utoipa::path(
    get,
    path = "/focus-time",
    responses(
        (status = 200, description = "Sessions", body = [FocusTimeResponse]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["focus-time"],
    operation_id = "listFocusTime"
)]
#[get("/focus-time")]
pub async fn list_focus_time(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<FocusTimeResponse>>> {
    let user_id = session.require_user_id()?;
    let sessions = state.focus_time_query.list_sessions(&user_id).await?;
    Ok(web::Json(
        sessions.into_iter().map(FocusTimeResponse::from).collect(),
    ))
}

/// Daily focus-time totals for the month containing `date`.
#[utoipa::path(
    get,
    path = "/focus-time/metrics",
    params(MetricsQuery),
    responses(
        (status = 200, description = "One bucket per active day", body = [FocusTimeDayResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 422, description = "Invalid date", body = ErrorSchema)
    ),
    tags = ["focus-time"],
    operation_id = "focusTimeMetrics"
)]
#[get("/focus-time/metrics")]
pub async fn focus_time_metrics(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MetricsQuery>,
) -> ApiResult<web::Json<Vec<FocusTimeDayResponse>>> {
    let user_id = session.require_user_id()?;
    let raw_date = require(query.into_inner().date, DATE)?;
    let date = parse_metrics_date(&raw_date, DATE)?;
    let buckets = state
        .focus_time_query
        .month_metrics(FocusTimeMetricsRequest { user_id, date })
        .await?;
    Ok(web::Json(
        buckets.into_iter().map(FocusTimeDayResponse::from).collect(),
    ))
}

/// Delete one of the caller's focus-time sessions.
#[utoipa::path(
    delete,
    path = "/focus-time/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such session", body = ErrorSchema),
        (status = 422, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["focus-time"],
    operation_id = "deleteFocusTime"
)]
#[delete("/focus-time/{id}")]
pub async fn delete_focus_time(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let session_id = parse_uuid(&path, ID)?;
    state
        .focus_time
        .delete_session(FocusTimeRef {
            user_id,
            session_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "focus_time_tests.rs"]
mod tests;
