//! Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::serializer::CategoryResponse, errors::ApiError, extensions::*, state::State,
};

/// Category Index Handler
///
/// Returns every category in creation order.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .or_500("failed to fetch categories")?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use catalog_app::domain::{
        categories::{CategoriesServiceError, MockCategoriesService, records::CategoryUuid},
        companies::records::CompanyUuid,
    };

    use crate::test_helpers::{categories_service, make_category};

    use super::*;

    fn make_service(repo: MockCategoriesService) -> Service {
        categories_service(repo, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_list_categories_success() -> TestResult {
        let company = CompanyUuid::new();
        let parent = make_category(CategoryUuid::new(), company, "親カテゴリ", None);
        let child = make_category(
            CategoryUuid::new(),
            company,
            "子カテゴリ",
            Some(parent.uuid),
        );

        let expected = vec![parent.clone(), child];

        let mut repo = MockCategoriesService::new();

        repo.expect_list_categories()
            .once()
            .return_once(move || Ok(expected));

        repo.expect_get_category().never();
        repo.expect_create_category().never();
        repo.expect_update_category().never();
        repo.expect_delete_category().never();

        let mut res = TestClient::get("http://example.com/categories")
            .send(&make_service(repo))
            .await;

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].name, "親カテゴリ");
        assert_eq!(body[0].parent_category, None);
        assert_eq!(body[1].parent_category, Some(parent.uuid.to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_empty_returns_empty_array() -> TestResult {
        let mut repo = MockCategoriesService::new();

        repo.expect_list_categories()
            .once()
            .return_once(|| Ok(Vec::new()));

        repo.expect_get_category().never();
        repo.expect_create_category().never();
        repo.expect_update_category().never();
        repo.expect_delete_category().never();

        let mut res = TestClient::get("http://example.com/categories")
            .send(&make_service(repo))
            .await;

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_categories_storage_failure_returns_500() -> TestResult {
        let mut repo = MockCategoriesService::new();

        repo.expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::InvalidData));

        repo.expect_get_category().never();
        repo.expect_create_category().never();
        repo.expect_update_category().never();
        repo.expect_delete_category().never();

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
