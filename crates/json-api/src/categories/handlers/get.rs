//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use catalog_app::domain::categories::records::CategoryUuid;

use crate::{
    categories::{errors::into_api_error, serializer::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Category Handler
///
/// Returns a category.
#[endpoint(tags("categories"), summary = "Get Category")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category: CategoryUuid = id.into_uuid_or_404()?;

    let category = state
        .app
        .categories
        .get_category(category)
        .await
        .map_err(|error| into_api_error(error, state.app.unique_scope))?;

    Ok(Json(category.into()))
}
