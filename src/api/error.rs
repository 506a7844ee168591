//! HTTP error mapping
//!
//! Every failure leaves the service as a JSON body of the form
//! `{ "error": <message>, "code": <CODE> }` with a status matching the
//! error kind. The CORS layer wraps these responses like any other.

use crate::utils::error::TubeloaderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// An error shaped for an HTTP response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<TubeloaderError> for ApiError {
    fn from(err: TubeloaderError) -> Self {
        let (status, code) = match &err {
            TubeloaderError::InvalidReference(_) => (StatusCode::BAD_REQUEST, "INVALID_REFERENCE"),
            TubeloaderError::VideoNotFound(_) => (StatusCode::NOT_FOUND, "VIDEO_NOT_FOUND"),
            TubeloaderError::FormatNotAvailable(_) => {
                (StatusCode::NOT_FOUND, "FORMAT_NOT_AVAILABLE")
            }
            TubeloaderError::YtDlpNotFound => {
                (StatusCode::SERVICE_UNAVAILABLE, "EXTRACTOR_UNAVAILABLE")
            }
            TubeloaderError::UpstreamTimeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
            }
            TubeloaderError::Network(e) if e.is_timeout() => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT")
            }
            TubeloaderError::Upstream(_)
            | TubeloaderError::Network(_)
            | TubeloaderError::Serialization(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            TubeloaderError::Io(_) | TubeloaderError::OperationFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            code: self.code,
        });
        (self.status, body).into_response()
    }
}
