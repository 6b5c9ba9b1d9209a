//! Habit HTTP handlers.
//!
//! ```text
//! GET    /habits
//! POST   /habits {"name":"Read"}
//! DELETE /habits/{id}
//! PATCH  /habits/{id}/toggle
//! GET    /habits/{id}/metrics?date=2024-03-01
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{CreateHabitRequest, HabitMetricsRequest, HabitRef};
use crate::domain::{Error, Habit, HabitMonthMetrics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_habit_name, parse_metrics_date, parse_uuid, require,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const DATE: FieldName = FieldName::new("date");

/// Habit as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: Uuid,
    #[schema(example = "Read")]
    pub name: String,
    /// Start-of-day timestamps in the order they were marked.
    pub completed_dates: Vec<DateTime<Utc>>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Habit> for HabitResponse {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id(),
            name: habit.name().to_string(),
            completed_dates: habit.completed_dates().to_vec(),
            user_id: *habit.user_id().as_uuid(),
            created_at: habit.created_at(),
            updated_at: habit.updated_at(),
        }
    }
}

/// A habit's completions within one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HabitMetricsResponse {
    pub id: Uuid,
    pub name: String,
    pub completed_dates: Vec<DateTime<Utc>>,
}

impl From<HabitMonthMetrics> for HabitMetricsResponse {
    fn from(metrics: HabitMonthMetrics) -> Self {
        Self {
            id: metrics.id,
            name: metrics.name.into(),
            completed_dates: metrics.completed_dates,
        }
    }
}

/// Body of `POST /habits`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitBody {
    #[schema(example = "Read")]
    pub name: Option<String>,
}

/// Query string shared by the monthly metrics endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MetricsQuery {
    /// RFC 3339 timestamp or `YYYY-MM-DD` date inside the requested month.
    #[param(example = "2024-03-01")]
    pub date: Option<String>,
}

fn habit_ref(session: &SessionContext, raw_id: &str) -> Result<HabitRef, Error> {
    let user_id = session.require_user_id()?;
    let habit_id = parse_uuid(raw_id, ID)?;
    Ok(HabitRef { user_id, habit_id })
}

/// List the caller's habits sorted by name.
#[utoipa::path(
    get,
    path = "/habits",
    responses(
        (status = 200, description = "Habits", body = [HabitResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "listHabits"
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<HabitResponse>>> {
    let user_id = session.require_user_id()?;
    let habits = state.habits_query.list_habits(&user_id).await?;
    Ok(web::Json(habits.into_iter().map(HabitResponse::from).collect()))
}

/// Create a habit with no completions.
#[utoipa::path(
    post,
    path = "/habits",
    request_body = CreateHabitBody,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Name already used by this owner", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 422, description = "Invalid body", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "createHabit"
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateHabitBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let raw_name = require(payload.into_inner().name, NAME)?;
    let name = parse_habit_name(&raw_name, NAME)?;
    let habit = state
        .habits
        .create_habit(CreateHabitRequest { user_id, name })
        .await?;
    Ok(HttpResponse::Created().json(HabitResponse::from(habit)))
}

/// Delete one of the caller's habits.
#[utoipa::path(
    delete,
    path = "/habits/{id}",
    params(("id" = String, Path, description = "Habit id")),
    responses(
        (status = 204, description = "Habit deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such habit", body = ErrorSchema),
        (status = 422, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "deleteHabit"
)]
#[delete("/habits/{id}")]
pub async fn delete_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let request = habit_ref(&session, &path)?;
    state.habits.delete_habit(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mark today complete, or un-mark it when it already is.
#[utoipa::path(
    patch,
    path = "/habits/{id}/toggle",
    params(("id" = String, Path, description = "Habit id")),
    responses(
        (status = 200, description = "Updated habit", body = HabitResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such habit", body = ErrorSchema),
        (status = 422, description = "Invalid id", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "toggleHabit"
)]
#[patch("/habits/{id}/toggle")]
pub async fn toggle_habit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<HabitResponse>> {
    let request = habit_ref(&session, &path)?;
    let habit = state.habits.toggle_today(request).await?;
    Ok(web::Json(habit.into()))
}

/// Completions of one habit inside the month containing `date`.
#[utoipa::path(
    get,
    path = "/habits/{id}/metrics",
    params(("id" = String, Path, description = "Habit id"), MetricsQuery),
    responses(
        (status = 200, description = "Completions in the month", body = HabitMetricsResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such habit", body = ErrorSchema),
        (status = 422, description = "Invalid id or date", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "habitMetrics"
)]
#[get("/habits/{id}/metrics")]
pub async fn habit_metrics(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<MetricsQuery>,
) -> ApiResult<web::Json<HabitMetricsResponse>> {
    let HabitRef { user_id, habit_id } = habit_ref(&session, &path)?;
    let raw_date = require(query.into_inner().date, DATE)?;
    let date = parse_metrics_date(&raw_date, DATE)?;
    let metrics = state
        .habits_query
        .month_metrics(HabitMetricsRequest {
            user_id,
            habit_id,
            date,
        })
        .await?;
    Ok(web::Json(metrics.into()))
}

#[cfg(test)]
#[path = "habits_tests.rs"]
mod tests;
