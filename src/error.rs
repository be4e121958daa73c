use axum::extract::rejection::JsonRejection;
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{Debug, Display};

use crate::pricing::ValidationError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again.";

/// Failure of an API call or of startup.
///
/// Codes `1..=99` are internal: callers only ever see a generic message, plus
/// `detail` when it has been explicitly exposed (development mode). Codes
/// `100` and up are caused by the caller and are reported as they are.
#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
    pub errors: Vec<ValidationError>,
    pub detail: Option<String>,
    pub expose_detail: bool,
}

impl Error {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
            detail: None,
            expose_detail: false,
        }
    }

    fn with_detail(mut self, detail: impl Display) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.code, 1..=99)
    }

    /// Lets `detail` reach the response body. Only development mode should.
    pub fn exposed(mut self, expose: bool) -> Self {
        self.expose_detail = expose;
        self
    }

    pub fn status(&self) -> StatusCode {
        if self.is_internal() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {}", self.message, self.code, detail),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        malformed_body_error(rejection)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.is_internal() {
            INTERNAL_ERROR_MESSAGE
        } else {
            self.message.as_str()
        };

        let mut body = json!({
            "success": false,
            "message": message,
        });

        if !self.errors.is_empty() {
            body["errors"] = json!(self.errors);
        }

        if self.expose_detail {
            if let Some(detail) = &self.detail {
                body["error"] = json!(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}

pub fn validation_error(errors: Vec<ValidationError>) -> Error {
    Error {
        errors,
        ..Error::new(100, "Validation failed")
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error::new(2, message)
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error::new(3, "reqwest error").with_detail(err)
}

pub fn upstream_error(detail: impl Display) -> Error {
    Error::new(4, "upstream error").with_detail(detail)
}

pub fn unexpected_error<T: Debug>(err: T) -> Error {
    Error::new(5, "unexpected error").with_detail(format!("{err:?}"))
}

pub fn malformed_body_error(rejection: JsonRejection) -> Error {
    Error::new(6, "malformed request body").with_detail(rejection)
}

pub fn notification_error(detail: impl Display) -> Error {
    Error::new(7, "notification delivery error").with_detail(detail)
}
