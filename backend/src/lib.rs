//! Habit and focus-time tracking backend.
//!
//! The crate is split along ports and adapters: [`domain`] holds entities,
//! services and the port traits, [`inbound`] exposes them over HTTP, and
//! [`outbound`] persists them in PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
