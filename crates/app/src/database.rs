//! Database connection management

use std::{str::FromStr, time::Duration};

use jiff::Timestamp;
use sqlx::{
    Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    query,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::domain::categories::data::UniqueScope;

const MAX_CONNECTIONS: u32 = 8;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const BEGIN_WRITE_SQL: &str = "BEGIN IMMEDIATE";

const DROP_COMPANY_NAME_INDEX_SQL: &str = "DROP INDEX IF EXISTS categories_company_name_key";

const DROP_COMPANY_PARENT_NAME_INDEX_SQL: &str =
    "DROP INDEX IF EXISTS categories_company_parent_name_key";

const CREATE_COMPANY_NAME_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     categories_company_name_key ON categories (company_uuid, name)";

const CREATE_COMPANY_PARENT_NAME_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     categories_company_parent_name_key \
     ON categories (company_uuid, IFNULL(parent_category_uuid, ''), name)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a transaction that takes the database write lock up front.
    ///
    /// A deferred transaction that reads before writing cannot wait for the lock once
    /// another writer holds it, so read-check-write sequences must start here.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or the write lock is not
    /// granted within the busy timeout.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with(BEGIN_WRITE_SQL).await
    }
}

/// Connect to `SQLite`, creating the database file when missing.
///
/// In-memory databases get a single connection that is never recycled, since every
/// new connection would otherwise open a separate empty database.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    pool_options.connect_with(options).await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Make the category name unique index match the configured scope.
///
/// # Errors
///
/// Returns an error when the index cannot be replaced, including when existing rows
/// already violate the requested scope.
pub async fn ensure_unique_name_index(
    pool: &SqlitePool,
    scope: UniqueScope,
) -> Result<(), sqlx::Error> {
    let (stale, create) = match scope {
        UniqueScope::Company => (
            DROP_COMPANY_PARENT_NAME_INDEX_SQL,
            CREATE_COMPANY_NAME_INDEX_SQL,
        ),
        UniqueScope::CompanyParent => (
            DROP_COMPANY_NAME_INDEX_SQL,
            CREATE_COMPANY_PARENT_NAME_INDEX_SQL,
        ),
    };

    let mut tx = pool.begin_with(BEGIN_WRITE_SQL).await?;

    query(stale).execute(&mut *tx).await?;
    query(create).execute(&mut *tx).await?;

    tx.commit().await
}

/// Parse an RFC 3339 timestamp stored as text.
pub(crate) fn decode_timestamp(column: &str, value: &str) -> Result<Timestamp, sqlx::Error> {
    value
        .parse::<Timestamp>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
