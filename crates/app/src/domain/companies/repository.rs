//! Companies Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query_as, sqlite::SqliteRow};

use crate::{
    database::decode_timestamp,
    domain::companies::{
        data::NewCompany,
        records::{CompanyRecord, CompanyUuid},
    },
};

const LIST_COMPANIES_SQL: &str = include_str!("sql/list_companies.sql");
const GET_COMPANY_SQL: &str = include_str!("sql/get_company.sql");
const CREATE_COMPANY_SQL: &str = include_str!("sql/create_company.sql");

#[derive(Debug, Clone)]
/// SQLite-backed companies repository.
pub(crate) struct SqliteCompaniesRepository {
    pool: SqlitePool,
}

impl SqliteCompaniesRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list_companies(&self) -> Result<Vec<CompanyRecord>, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(LIST_COMPANIES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(GET_COMPANY_SQL)
            .bind(company.encode())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_company(
        &self,
        company: NewCompany,
        now: Timestamp,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(CREATE_COMPANY_SQL)
            .bind(company.uuid.encode())
            .bind(company.name)
            .bind(now.to_string())
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for CompanyRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CompanyUuid::decode("uuid", row.try_get("uuid")?)?,
            name: row.try_get("name")?,
            created_at: decode_timestamp("created_at", row.try_get("created_at")?)?,
            updated_at: decode_timestamp("updated_at", row.try_get("updated_at")?)?,
        })
    }
}
