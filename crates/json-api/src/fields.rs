//! Field-level decoding shared by the resource serializers.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{FieldErrors, NON_FIELD_ERRORS};

/// Longest accepted name, in characters.
pub(crate) const NAME_MAX_LENGTH: usize = 255;

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const NOT_NULL: &str = "This field may not be null.";
pub(crate) const NOT_BLANK: &str = "This field may not be blank.";
pub(crate) const NOT_A_STRING: &str = "Not a valid string.";

/// Whether absent fields are errors (create, replace) or left alone (partial update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Full,
    Partial,
}

/// JSON type name used in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The request body as a field map.
pub(crate) fn expect_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object().ok_or_else(|| {
        FieldErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type(body)
            ),
        )
    })
}

/// Decode a required-when-full, trimmed, non-blank, length-limited string.
pub(crate) fn decode_name(
    object: &Map<String, Value>,
    field: &'static str,
    mode: Mode,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(value) = object.get(field) else {
        if mode == Mode::Full {
            errors.add(field, REQUIRED);
        }

        return None;
    };

    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Null => {
            errors.add(field, NOT_NULL);

            return None;
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            errors.add(field, NOT_A_STRING);

            return None;
        }
    };

    let name = raw.trim();

    if name.is_empty() {
        errors.add(field, NOT_BLANK);

        return None;
    }

    if name.chars().count() > NAME_MAX_LENGTH {
        errors.add(
            field,
            format!("Ensure this field has no more than {NAME_MAX_LENGTH} characters."),
        );

        return None;
    }

    Some(name.to_string())
}

/// Decode a primary-key reference. `null` is handled by the caller.
pub(crate) fn decode_pk(value: &Value) -> Result<Uuid, String> {
    match value {
        Value::String(text) => {
            Uuid::parse_str(text).map_err(|_ignored| format!("“{text}” is not a valid UUID."))
        }
        other => Err(format!(
            "Incorrect type. Expected pk value, received {}.",
            json_type(other)
        )),
    }
}

/// Message for a well-formed reference to a row that does not exist.
pub(crate) fn does_not_exist(pk: impl std::fmt::Display) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}
