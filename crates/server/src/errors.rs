use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::debug;

/// Client-facing failures of the record dispatcher.
///
/// None of these touch the store; every variant is a complete response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid id")]
    InvalidId,
    #[error("invalid request payload: {0}")]
    InvalidPayload(String),
    #[error("item not found")]
    NotFound,
    #[error("unsupported method")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidPayload(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        debug!(status = status.as_u16(), error = %msg, "request rejected");
        let mut res = (status, Json(serde_json::json!({"error": msg}))).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            res.headers_mut().insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        res
    }
}

/// Methods served on a record resource, advertised with every 405.
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
