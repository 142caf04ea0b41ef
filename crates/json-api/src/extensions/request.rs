//! Request body helpers.

use salvo::Request;
use serde_json::{Map, Value};

use crate::errors::ApiError;

/// Read the request body as untyped JSON so validation can report per-field errors.
pub(crate) trait RequestBodyExt {
    async fn json_value(&mut self) -> Result<Value, ApiError>;
}

impl RequestBodyExt for Request {
    async fn json_value(&mut self) -> Result<Value, ApiError> {
        let payload = self
            .payload()
            .await
            .map_err(|error| ApiError::Parse(error.to_string()))?;

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_slice(payload).map_err(|error| ApiError::Parse(error.to_string()))
    }
}
