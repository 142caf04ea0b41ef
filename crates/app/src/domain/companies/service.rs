//! Companies service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::companies::{
        data::NewCompany,
        errors::CompaniesServiceError,
        records::{CompanyRecord, CompanyUuid},
        repository::SqliteCompaniesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCompaniesService {
    repository: SqliteCompaniesRepository,
}

impl SqliteCompaniesService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: SqliteCompaniesRepository::new(db.pool().clone()),
        }
    }
}

#[async_trait]
impl CompaniesService for SqliteCompaniesService {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError> {
        self.repository.list_companies().await.map_err(Into::into)
    }

    async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        self.repository
            .get_company(company)
            .await
            .map_err(Into::into)
    }

    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let name = company.name.trim().to_string();

        if name.is_empty() {
            return Err(CompaniesServiceError::MissingRequiredData);
        }

        self.repository
            .create_company(NewCompany { name, ..company }, Timestamp::now())
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Company persistence operations.
pub trait CompaniesService: Send + Sync {
    /// Retrieves all companies in creation order.
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError>;

    /// Retrieve a single company.
    async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Creates a new company.
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError>;
}
