use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::types::{ProxyResponse, StorageFailure};

pub const REJECTED_MESSAGE: &str = "필수 필드 누락 또는 타입 불일치";
pub const PROXY_FALLBACK_MESSAGE: &str = "프록시 오류";
pub const STORAGE_FALLBACK_MESSAGE: &str = "업로드 실패";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body is not a JSON object")]
    NotAnObject,
    #[error("field `{0}` is missing or has the wrong type")]
    InvalidField(&'static str),
}

/// Everything that can go wrong while serving the try-on proxy endpoint.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::MalformedBody(_) | ProxyError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client; validation details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ProxyError::Validation(_) => REJECTED_MESSAGE.to_string(),
            other => non_empty_or(other.to_string(), PROXY_FALLBACK_MESSAGE),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ProxyResponse::failure(self.client_message()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("필수 필드 누락")]
    MissingFields,
    #[error("n_images is not a number")]
    InvalidCount,
    #[error("cannot write {0} copies")]
    UnsupportedCount(f64),
    #[error("image is not valid base64: {0}")]
    InvalidImage(#[from] base64::DecodeError),
    #[error(transparent)]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn status(&self) -> StatusCode {
        match self {
            StorageError::MissingFields
            | StorageError::InvalidCount
            | StorageError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            StorageError::UnsupportedCount(_)
            | StorageError::MalformedBody(_)
            | StorageError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = StorageFailure {
            ok: false,
            error: non_empty_or(self.to_string(), STORAGE_FALLBACK_MESSAGE),
        };
        (status, Json(body)).into_response()
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
