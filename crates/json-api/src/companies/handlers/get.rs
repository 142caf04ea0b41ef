//! Get Company Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use catalog_app::domain::companies::records::CompanyUuid;

use crate::{
    companies::{errors::into_api_error, serializer::CompanyResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Company Handler
#[endpoint(tags("companies"), summary = "Get Company")]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CompanyResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let company: CompanyUuid = id.into_uuid_or_404()?;

    let company = state
        .app
        .companies
        .get_company(company)
        .await
        .map_err(into_api_error)?;

    Ok(Json(company.into()))
}
