//! Categories Repository

use jiff::Timestamp;
use sqlx::{
    FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow,
};

use crate::{
    database::decode_timestamp,
    domain::{
        categories::{
            data::UniqueScope,
            records::{CategoryRecord, CategoryUuid},
        },
        companies::records::CompanyUuid,
    },
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const COMPANY_EXISTS_SQL: &str = include_str!("sql/company_exists.sql");
const CATEGORY_EXISTS_SQL: &str = include_str!("sql/category_exists.sql");
const COUNT_COMPANY_NAME_SQL: &str = include_str!("sql/count_company_name.sql");
const COUNT_COMPANY_PARENT_NAME_SQL: &str = include_str!("sql/count_company_parent_name.sql");

/// Column values written by create and update.
#[derive(Debug, Clone)]
pub(crate) struct CategoryRow<'a> {
    pub(crate) company: CompanyUuid,
    pub(crate) name: &'a str,
    pub(crate) parent_category: Option<CategoryUuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCategoriesRepository;

impl SqliteCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.encode())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryUuid,
        row: &CategoryRow<'_>,
        now: Timestamp,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.encode())
            .bind(row.company.encode())
            .bind(row.name)
            .bind(row.parent_category.map(CategoryUuid::encode))
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryUuid,
        row: &CategoryRow<'_>,
        now: Timestamp,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.encode())
            .bind(row.company.encode())
            .bind(row.name)
            .bind(row.parent_category.map(CategoryUuid::encode))
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.encode())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn company_exists(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
    ) -> Result<bool, sqlx::Error> {
        let count = query_scalar::<Sqlite, i64>(COMPANY_EXISTS_SQL)
            .bind(company.encode())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count > 0)
    }

    pub(crate) async fn category_exists(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: CategoryUuid,
    ) -> Result<bool, sqlx::Error> {
        let count = query_scalar::<Sqlite, i64>(CATEGORY_EXISTS_SQL)
            .bind(category.encode())
            .fetch_one(&mut **tx)
            .await?;

        Ok(count > 0)
    }

    /// Whether another category already holds `row.name` within `scope`.
    pub(crate) async fn name_taken(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        scope: UniqueScope,
        row: &CategoryRow<'_>,
        excluding: Option<CategoryUuid>,
    ) -> Result<bool, sqlx::Error> {
        let excluding = excluding.map(CategoryUuid::encode);

        let count = match scope {
            UniqueScope::Company => {
                query_scalar::<Sqlite, i64>(COUNT_COMPANY_NAME_SQL)
                    .bind(row.company.encode())
                    .bind(row.name)
                    .bind(excluding)
                    .fetch_one(&mut **tx)
                    .await?
            }
            UniqueScope::CompanyParent => {
                query_scalar::<Sqlite, i64>(COUNT_COMPANY_PARENT_NAME_SQL)
                    .bind(row.company.encode())
                    .bind(row.name)
                    .bind(excluding)
                    .bind(row.parent_category.map(CategoryUuid::encode))
                    .fetch_one(&mut **tx)
                    .await?
            }
        };

        Ok(count > 0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CategoryRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let parent_category = row
            .try_get::<Option<&str>, _>("parent_category_uuid")?
            .map(|value| CategoryUuid::decode("parent_category_uuid", value))
            .transpose()?;

        Ok(Self {
            uuid: CategoryUuid::decode("uuid", row.try_get("uuid")?)?,
            company: CompanyUuid::decode("company_uuid", row.try_get("company_uuid")?)?,
            name: row.try_get("name")?,
            parent_category,
            created_at: decode_timestamp("created_at", row.try_get("created_at")?)?,
            updated_at: decode_timestamp("updated_at", row.try_get("updated_at")?)?,
        })
    }
}
