//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        categories::{CategoriesService, SqliteCategoriesService, data::UniqueScope},
        companies::{CompaniesService, SqliteCompaniesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),

    #[error("failed to create category name index")]
    UniqueIndex(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub companies: Arc<dyn CompaniesService>,
    pub unique_scope: UniqueScope,
}

impl AppContext {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoriesService>,
        companies: Arc<dyn CompaniesService>,
        unique_scope: UniqueScope,
    ) -> Self {
        Self {
            categories,
            companies,
            unique_scope,
        }
    }

    /// Build application context from a database URL.
    ///
    /// Applies pending migrations and makes the category name index match
    /// `unique_scope` before any service is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or indexing fails.
    pub async fn from_database_url(
        url: &str,
        unique_scope: UniqueScope,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        database::ensure_unique_name_index(&pool, unique_scope)
            .await
            .map_err(AppInitError::UniqueIndex)?;

        let db = Db::new(pool);

        Ok(Self::new(
            Arc::new(SqliteCategoriesService::new(db.clone(), unique_scope)),
            Arc::new(SqliteCompaniesService::new(&db)),
            unique_scope,
        ))
    }
}
