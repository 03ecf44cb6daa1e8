use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::host::{AuthError, HostError};
use crate::ledger::LedgerError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("caller authentication failed: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(e) if e.is_authorization_failure() => StatusCode::FORBIDDEN,
            ApiError::Ledger(LedgerError::AlreadyInitialized) => StatusCode::CONFLICT,
            ApiError::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HostError> for ApiError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Ledger(e) => ApiError::Ledger(e),
            other => {
                error!("Ledger host failure: {}", other);
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Body returned for every failed request. `err` carries the ledger's numeric
/// code and is absent for failures outside the ledger.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<u32>,
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Ledger(e) => ErrorBody {
                err: Some(e.code()),
                error: e.name().to_string(),
                message: e.to_string(),
            },
            ApiError::Unauthorized(e) => {
                warn!("Rejected caller: {}", e);
                ErrorBody {
                    err: None,
                    error: "UNAUTHORIZED".to_string(),
                    message: self.to_string(),
                }
            }
            ApiError::BadRequest(_) => ErrorBody {
                err: None,
                error: "BAD-REQUEST".to_string(),
                message: self.to_string(),
            },
            ApiError::Internal(_) => ErrorBody {
                err: None,
                error: "INTERNAL".to_string(),
                message: "ledger state could not be committed".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
