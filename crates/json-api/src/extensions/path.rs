//! Path parameter helpers.

use salvo::oapi::extract::PathParam;
use uuid::Uuid;

use crate::errors::ApiError;

/// Resolve a path segment into a typed identifier.
///
/// A segment that is not a UUID cannot name any stored record, so it is reported
/// as not found rather than as a bad request.
pub(crate) trait PathUuidExt {
    fn into_uuid_or_404<T: From<Uuid>>(self) -> Result<T, ApiError>;
}

impl PathUuidExt for PathParam<String> {
    fn into_uuid_or_404<T: From<Uuid>>(self) -> Result<T, ApiError> {
        Uuid::parse_str(&self.into_inner())
            .map(T::from)
            .map_err(|_ignored| ApiError::NotFound)
    }
}
