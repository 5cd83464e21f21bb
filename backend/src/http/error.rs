//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::booking::BookingError;
use crate::services::conflict::Rejection;

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Undecodable request body
    BadRequest(String),
    /// Booking refused by the conflict resolver
    Rejected(Rejection),
    /// Client exceeded its request budget
    TooManyRequests,
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(rejection) => match rejection {
                Rejection::MissingFields => StatusCode::BAD_REQUEST,
                Rejection::LaunchSiteConflict { .. }
                | Rejection::DestinationRotationMismatch { .. } => StatusCode::CONFLICT,
                Rejection::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ApiError {
        match self {
            AppError::BadRequest(msg) => ApiError::new("BAD_REQUEST", msg.clone()),
            AppError::Rejected(rejection) => {
                let code = match rejection {
                    Rejection::MissingFields => "MISSING_FIELDS",
                    Rejection::LaunchSiteConflict { .. } => "LAUNCH_SITE_CONFLICT",
                    Rejection::DestinationRotationMismatch { .. } => {
                        "DESTINATION_ROTATION_MISMATCH"
                    }
                    Rejection::Upstream(_) => "UPSTREAM_ERROR",
                };
                ApiError::new(code, rejection.to_string())
            }
            AppError::TooManyRequests => {
                ApiError::new("TOO_MANY_REQUESTS", "Too many requests, slow down")
            }
            AppError::Repository(e) => {
                let error = ApiError::new("REPOSITORY_ERROR", "Failed to access booking store");
                match e.context().operation.as_deref() {
                    Some(operation) => error.with_details(format!("operation={}", operation)),
                    None => error,
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::Rejected(rejection)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Rejected(rejection) => AppError::Rejected(rejection),
            BookingError::Repository(e) => AppError::Repository(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::DestinationId;

    #[test]
    fn test_rejections_map_to_status_codes() {
        let day = NaiveDate::from_ymd_opt(2049, 12, 25).unwrap();
        let cases = [
            (Rejection::MissingFields, StatusCode::BAD_REQUEST),
            (
                Rejection::LaunchSiteConflict {
                    launchpad_id: "pad".into(),
                    launch_date: day,
                    record_id: "r".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                Rejection::DestinationRotationMismatch {
                    requested: DestinationId::new(1),
                    expected: DestinationId::new(6),
                    launch_date: day,
                },
                StatusCode::CONFLICT,
            ),
            (
                Rejection::Upstream("feed down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (rejection, status) in cases {
            assert_eq!(AppError::Rejected(rejection).status(), status);
        }
    }

    #[test]
    fn test_repository_error_hides_message_but_keeps_operation() {
        let err = AppError::from(
            RepositoryError::connection("password authentication failed").with_operation("create_booking"),
        );
        let body = err.body();
        assert_eq!(body.code, "REPOSITORY_ERROR");
        assert!(!body.message.contains("password"));
        assert_eq!(body.details.as_deref(), Some("operation=create_booking"));
    }
}
