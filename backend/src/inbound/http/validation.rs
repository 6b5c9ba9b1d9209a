//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every malformed request is rejected with `422 Unprocessable Entity` and a
//! `details.fields` array of `{field, message, code}` entries before any port
//! is called. The extractor configs at the bottom route actix's own JSON, path
//! and query failures through the same shape.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, error::QueryPayloadError, web};
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, HabitName, MetricsDate};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidDate,
    InvalidName,
    InvalidBody,
    InvalidPath,
    InvalidQuery,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidDate => "invalid_date",
            Self::InvalidName => "invalid_name",
            Self::InvalidBody => "invalid_body",
            Self::InvalidPath => "invalid_path",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    field: String,
    message: String,
    code: ValidationCode,
}

impl FieldError {
    pub(crate) fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: ValidationCode,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "field": self.field,
            "message": self.message,
            "code": self.code.as_str(),
        })
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        validation_failed(vec![value])
    }
}

/// Build a `validation_failed` error listing every rejected field.
pub(crate) fn validation_failed(fields: Vec<FieldError>) -> Error {
    let message = match fields.as_slice() {
        [single] => single.message.clone(),
        _ => "request validation failed".to_owned(),
    };
    let entries: Vec<_> = fields.iter().map(FieldError::to_json).collect();
    Error::validation(message).with_details(json!({ "fields": entries }))
}

/// Collects field errors so a request reports all of its problems at once.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record the error, if any, and pass the value through.
    pub(crate) fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    pub(crate) fn into_result(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(validation_failed(self.0))
        }
    }
}

pub(crate) fn missing_field(field: FieldName) -> FieldError {
    let field = field.as_str();
    FieldError::new(
        field,
        format!("missing required field: {field}"),
        ValidationCode::MissingField,
    )
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, FieldError> {
    value.ok_or_else(|| missing_field(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, FieldError> {
    Uuid::parse_str(value).map_err(|_| {
        let field = field.as_str();
        FieldError::new(
            field,
            format!("{field} must be a valid UUID"),
            ValidationCode::InvalidUuid,
        )
    })
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, FieldError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let field = field.as_str();
            FieldError::new(
                field,
                format!("{field} must be an RFC 3339 timestamp"),
                ValidationCode::InvalidTimestamp,
            )
        })
}

pub(crate) fn parse_metrics_date(value: &str, field: FieldName) -> Result<MetricsDate, FieldError> {
    value.parse::<MetricsDate>().map_err(|err| {
        FieldError::new(
            field.as_str(),
            format!("{}: {err}", field.as_str()),
            ValidationCode::InvalidDate,
        )
    })
}

pub(crate) fn parse_habit_name(value: &str, field: FieldName) -> Result<HabitName, FieldError> {
    HabitName::new(value)
        .map_err(|err| FieldError::new(field.as_str(), err.to_string(), ValidationCode::InvalidName))
}

fn extractor_error(field: &str, message: String, code: ValidationCode) -> actix_web::Error {
    Error::from(FieldError::new(field, message, code)).into()
}

/// JSON body config rejecting malformed payloads with 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        extractor_error("body", err.to_string(), ValidationCode::InvalidBody)
    })
}

/// Path config rejecting unparseable segments with 422.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        extractor_error("path", err.to_string(), ValidationCode::InvalidPath)
    })
}

/// Query-string config rejecting malformed parameters with 422.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        extractor_error("query", err.to_string(), ValidationCode::InvalidQuery)
    })
}
