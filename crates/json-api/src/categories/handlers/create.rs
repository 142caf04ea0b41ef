//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use catalog_app::domain::categories::records::CategoryUuid;

use crate::{
    categories::{
        errors::into_api_error,
        serializer::{self, CategoryResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req.json_value().await?;
    let category = serializer::decode_new(&body, CategoryUuid::new())?;

    let category = state
        .app
        .categories
        .create_category(category)
        .await
        .map_err(|error| into_api_error(error, state.app.unique_scope))?;

    res.add_header(LOCATION, format!("/categories/{}", category.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(
        category_uuid = %category.uuid,
        company_uuid = %category.company,
        "created category"
    );

    Ok(Json(category.into()))
}
