// error.rs - errors returned to API clients

use super::auth::AuthDenied;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use store::TokenError;

/// Every failure a handler can answer with. Each renders as a JSON body carrying a
/// human readable `message`; unprocessable requests also carry a stable `code`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Unprocessable {
        code: &'static str,
        message: &'static str,
    },

    #[error(transparent)]
    Unauthorized(#[from] AuthDenied),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Unprocessable { code, message } => json!({
                "code": code,
                "message": message,
            }),
            _ => json!({ "message": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
