// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use activities_common::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::roster::RosterError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Activity not found")]
    ActivityNotFound(String),

    #[error("Student is already signed up for this activity")]
    AlreadySignedUp { activity: String, email: String },

    #[error("Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not Found")]
    RouteNotFound,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ActivityNotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::AlreadySignedUp { .. } | AppError::NotSignedUp { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ActivityNotFound(_) => "ACT_001",
            AppError::AlreadySignedUp { .. } => "ROSTER_001",
            AppError::NotSignedUp { .. } => "ROSTER_002",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::RouteNotFound => "NF_001",
        }
    }
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound { activity } => AppError::ActivityNotFound(activity),
            RosterError::AlreadyRegistered { activity, email } => {
                AppError::AlreadySignedUp { activity, email }
            }
            RosterError::NotRegistered { activity, email } => {
                AppError::NotSignedUp { activity, email }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), error = %self, "request rejected");

        // Domain messages carry no sensitive context and go out verbatim
        let body = ErrorResponse::new(self.to_string());
        (status, Json(body)).into_response()
    }
}
