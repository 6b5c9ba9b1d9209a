//! Root endpoint describing the running service.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

/// Package metadata served at `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "habit-tracker")]
    pub name: String,
    pub description: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl ServiceInfo {
    /// Metadata of this build.
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_owned(),
            description: env!("CARGO_PKG_DESCRIPTION").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Service name, description and version.
#[utoipa::path(
    get,
    path = "/",
    tags = ["service"],
    security([]),
    responses((status = 200, description = "Service metadata", body = ServiceInfo))
)]
#[get("/")]
pub async fn service_info() -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo::current())
}
