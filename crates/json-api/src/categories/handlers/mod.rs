//! Category Handlers

use catalog_app::domain::categories::records::{CategoryRecord, CategoryUuid};
use salvo::Request;

use crate::{
    categories::{errors::into_api_error, serializer},
    errors::ApiError,
    extensions::*,
    fields::Mode,
    state::State,
};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod partial_update;
pub(crate) mod update;

/// Shared body of the replace and partial update handlers.
///
/// The category must exist before its body is looked at, so an unknown id is a 404
/// whatever the payload contains.
async fn apply_update(
    state: &State,
    category: CategoryUuid,
    req: &mut Request,
    mode: Mode,
) -> Result<CategoryRecord, ApiError> {
    let scope = state.app.unique_scope;

    state
        .app
        .categories
        .get_category(category)
        .await
        .map_err(|error| into_api_error(error, scope))?;

    let body = req.json_value().await?;
    let update = serializer::decode_update(&body, mode)?;

    state
        .app
        .categories
        .update_category(category, update)
        .await
        .map_err(|error| into_api_error(error, scope))
}
