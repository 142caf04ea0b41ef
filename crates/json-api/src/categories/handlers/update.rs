//! Update Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;

use catalog_app::domain::categories::records::CategoryUuid;

use crate::{
    categories::serializer::CategoryResponse, errors::ApiError, extensions::*, fields::Mode,
    state::State,
};

/// Update Category Handler
///
/// Replaces `company` and `name`. An absent `parent_category` keeps the stored
/// parent, `null` clears it.
#[endpoint(tags("categories"), summary = "Update Category")]
#[tracing::instrument(
    name = "categories.update",
    skip(id, req, depot),
    fields(category_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category: CategoryUuid = id.into_uuid_or_404()?;

    tracing::Span::current().record("category_uuid", tracing::field::display(category));

    let category = super::apply_update(state, category, req, Mode::Full).await?;

    info!(category_uuid = %category.uuid, "updated category");

    Ok(Json(category.into()))
}
