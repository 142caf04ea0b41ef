//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use catalog_app::{
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            data::UniqueScope,
            records::{CategoryRecord, CategoryUuid},
        },
        companies::{
            MockCompaniesService,
            records::{CompanyRecord, CompanyUuid},
        },
    },
};

use crate::state::State;

pub(crate) fn make_category(
    uuid: CategoryUuid,
    company: CompanyUuid,
    name: &str,
    parent_category: Option<CategoryUuid>,
) -> CategoryRecord {
    CategoryRecord {
        uuid,
        company,
        name: name.to_string(),
        parent_category,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_company(uuid: CompanyUuid, name: &str) -> CompanyRecord {
    CompanyRecord {
        uuid,
        name: name.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_companies_mock() -> MockCompaniesService {
    let mut companies = MockCompaniesService::new();

    companies.expect_list_companies().never();
    companies.expect_get_company().never();
    companies.expect_create_company().never();

    companies
}

pub(crate) fn state_with(
    categories: MockCategoriesService,
    companies: MockCompaniesService,
    unique_scope: UniqueScope,
) -> Arc<State> {
    State::from_app_context(AppContext::new(
        Arc::new(categories),
        Arc::new(companies),
        unique_scope,
    ))
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(
                categories,
                strict_companies_mock(),
                UniqueScope::Company,
            )))
            .push(route),
    )
}

pub(crate) fn companies_service(companies: MockCompaniesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(
                strict_categories_mock(),
                companies,
                UniqueScope::Company,
            )))
            .push(route),
    )
}
