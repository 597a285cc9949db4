//! HTTP-facing error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use todolist_core::RepoError;

/// Error returned by route handlers.
#[derive(Debug)]
pub enum AppError {
    Repo(RepoError),
    BadRequest(String),
    Task(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::Task(message) => write!(f, "store task failed: {message}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Repo(RepoError::Validation(_)) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Repo(RepoError::ListNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Repo(RepoError::Validation(err)) => err.to_string(),
            Self::Repo(RepoError::ListNotFound(_)) => "list not found".to_string(),
            Self::BadRequest(message) => message.clone(),
            _ => {
                error!(
                    "event=http_error module=http status=error code={} error={self}",
                    status.as_u16()
                );
                "internal server error".to_string()
            }
        };
        (status, body).into_response()
    }
}
