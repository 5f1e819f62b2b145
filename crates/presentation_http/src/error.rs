//! API error handling
//!
//! Failed rolls answer with a bare 500 and no body. Details only go to the
//! logs and the trace.

use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The error gate fired
    #[error("Injected fault: {0}")]
    InjectedFault(String),

    /// Any other failure while serving the request
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InjectedFault(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(msg) = &self {
            tracing::error!(error = %msg, "Request failed");
        }
        self.status_code().into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_injected() {
            Self::InjectedFault(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
