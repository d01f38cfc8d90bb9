use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Everything a handler can fail with. Domain errors are mapped to a status
/// here and nowhere else.
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected before the service was called.
    BadRequest(String),
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::EmptyField { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::InvalidEmail) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::RepositoryError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Domain(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
