use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use wayfinder_core::{Error as CoreError, Floor};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Routing(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No location on floor {0}")]
    EmptyFloor(Floor),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON body of every error response, also used for failed batch entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Routing(err) => match err {
                CoreError::UnknownLocation(_) => StatusCode::NOT_FOUND,
                CoreError::Unreachable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::InvalidData(_) => StatusCode::BAD_REQUEST,
                CoreError::IoError(_) | CoreError::GeoJsonError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptyFloor(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Routing(err) => match err {
                CoreError::UnknownLocation(_) => "unknown_location",
                CoreError::Unreachable { .. } => "unreachable",
                CoreError::InvalidData(_) => "invalid_data",
                CoreError::IoError(_) | CoreError::GeoJsonError(_) => "internal",
            },
            ApiError::BadRequest(_) => "bad_request",
            ApiError::EmptyFloor(_) => "not_found",
            ApiError::Timeout => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
