use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use crate::models::SUPPORTED_CULTURES;

/// API error returned by the culture endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    // Validation errors 4xxx
    #[error("Validation error: {0}")]
    ValidationError(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::ValidationError(_) => 4001,
            Self::InternalError(_) => 5001,
        }
    }

    /// Error message translated into `locale`
    pub fn localized_message(&self, locale: &str) -> String {
        match self {
            Self::ValidationError(details) => {
                t!("validation.failed", locale = locale, details = details).to_string()
            },
            Self::InternalError(msg) => {
                t!("internal.error", locale = locale, message = msg).to_string()
            },
        }
    }

    /// Build the JSON error response with a message in `locale`
    pub fn into_response_for(self, locale: &str) -> Response {
        let code = self.error_code();
        let message = self.localized_message(locale);

        let status = match code {
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ApiErrorResponse { code, message })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_for(SUPPORTED_CULTURES[0].code)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::validation_error(err.to_string())
    }
}

/// Body extraction failures: client-side rejections become validation errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status().is_server_error() {
            ApiError::internal_error(rejection.body_text())
        } else {
            ApiError::validation_error(rejection.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_status() {
        let resp = ApiError::validation_error("culture: length").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::internal_error("boom").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_localized_message_uses_locale() {
        let err = ApiError::validation_error("culture");
        let en = err.localized_message("en-US");
        let ar = err.localized_message("ar-SA");
        assert!(en.contains("culture"));
        assert!(ar.contains("culture"));
        assert_ne!(en, ar);
    }
}
