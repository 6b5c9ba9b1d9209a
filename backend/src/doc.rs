//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every endpoint of the inbound HTTP layer, the error
//! schema wrappers from [`crate::inbound::http::schemas`], and the session
//! cookie security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::focus_time::{
    CreateFocusTimeBody, FocusTimeDayResponse, FocusTimeResponse,
};
use crate::inbound::http::habits::{CreateHabitBody, HabitMetricsResponse, HabitResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::service_info::ServiceInfo;
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit tracker API",
        description = "Habits with daily completion toggles, focus-time sessions and monthly metrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::service_info::service_info,
        crate::inbound::http::users::login,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::habits::toggle_habit,
        crate::inbound::http::habits::habit_metrics,
        crate::inbound::http::focus_time::create_focus_time,
        crate::inbound::http::focus_time::list_focus_time,
        crate::inbound::http::focus_time::focus_time_metrics,
        crate::inbound::http::focus_time::delete_focus_time,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        ServiceInfo,
        HabitResponse,
        HabitMetricsResponse,
        CreateHabitBody,
        FocusTimeResponse,
        FocusTimeDayResponse,
        CreateFocusTimeBody,
    )),
    tags(
        (name = "service", description = "Service metadata"),
        (name = "users", description = "Login"),
        (name = "habits", description = "Habits and their daily completions"),
        (name = "focus-time", description = "Focus-time sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
