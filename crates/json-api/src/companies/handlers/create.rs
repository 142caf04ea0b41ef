//! Create Company Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use catalog_app::domain::companies::records::CompanyUuid;

use crate::{
    companies::{
        errors::into_api_error,
        serializer::{self, CompanyResponse},
    },
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Company Handler
#[endpoint(
    tags("companies"),
    summary = "Create Company",
    responses(
        (status_code = StatusCode::CREATED, description = "Company created"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CompanyResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req.json_value().await?;
    let company = serializer::decode_new(&body, CompanyUuid::new())?;

    let company = state
        .app
        .companies
        .create_company(company)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/companies/{}", company.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(company_uuid = %company.uuid, "created company");

    Ok(Json(company.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::domain::companies::MockCompaniesService;

    use crate::test_helpers::{companies_service, make_company};

    use super::*;

    fn make_service(repo: MockCompaniesService) -> Service {
        companies_service(repo, Router::with_path("companies").post(handler))
    }

    #[tokio::test]
    async fn test_create_company_success() -> TestResult {
        let mut repo = MockCompaniesService::new();

        repo.expect_create_company()
            .once()
            .withf(|new| new.name == "Test社")
            .return_once(|new| Ok(make_company(new.uuid, &new.name)));

        repo.expect_list_companies().never();
        repo.expect_get_company().never();

        let mut res = TestClient::post("http://example.com/companies")
            .json(&json!({ "name": "Test社" }))
            .send(&make_service(repo))
            .await;

        let body: CompanyResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.name, "Test社");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_company_blank_name_returns_400() -> TestResult {
        let mut repo = MockCompaniesService::new();

        repo.expect_create_company().never();
        repo.expect_list_companies().never();
        repo.expect_get_company().never();

        let mut res = TestClient::post("http://example.com/companies")
            .json(&json!({ "name": "" }))
            .send(&make_service(repo))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, json!({ "name": ["This field may not be blank."] }));

        Ok(())
    }
}
