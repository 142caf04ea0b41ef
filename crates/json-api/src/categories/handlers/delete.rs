//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use catalog_app::domain::categories::records::CategoryUuid;

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, state::State,
};

/// Delete Category Handler
///
/// Children of the deleted category are kept with no parent.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Category deleted"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category: CategoryUuid = id.into_uuid_or_404()?;

    state
        .app
        .categories
        .delete_category(category)
        .await
        .map_err(|error| into_api_error(error, state.app.unique_scope))?;

    info!(category_uuid = %category, "deleted category");

    Ok(StatusCode::NO_CONTENT)
}
