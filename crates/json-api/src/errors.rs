//! HTTP error responses.

use std::collections::BTreeMap;

use salvo::{
    http::StatusCode,
    oapi::{self, Components, EndpointOutRegister, Operation},
    prelude::{Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key for errors that do not belong to a single field.
pub(crate) const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub(crate) fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();

        errors.add(field, message);

        errors
    }

    pub(crate) fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Body of non-validation error responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("malformed request body: {0}")]
    Parse(String),

    #[error("not found")]
    NotFound,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());

        let detail = match self {
            Self::Validation(errors) => {
                res.render(Json(errors));

                return;
            }
            Self::Parse(reason) => format!("JSON parse error - {reason}"),
            Self::NotFound => "Not found.".to_string(),
            Self::Internal => "A server error occurred.".to_string(),
        };

        res.render(Json(ErrorDetail { detail }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, operation: &mut Operation) {
        for (status_code, description) in [
            (StatusCode::BAD_REQUEST, "Invalid payload"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation
                .responses
                .insert(status_code.as_str(), oapi::Response::new(description));
        }
    }
}
