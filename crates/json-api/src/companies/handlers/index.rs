//! Company Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    companies::serializer::CompanyResponse, errors::ApiError, extensions::*, state::State,
};

/// Company Index Handler
#[endpoint(tags("companies"), summary = "List Companies")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let companies = state
        .app
        .companies
        .list_companies()
        .await
        .or_500("failed to fetch companies")?;

    Ok(Json(companies.into_iter().map(Into::into).collect()))
}
