//! Categories service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory, UniqueScope},
        errors::{CategoriesServiceError, UnresolvedReferences},
        records::{CategoryRecord, CategoryUuid},
        repository::{CategoryRow, SqliteCategoriesRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCategoriesService {
    db: Db,
    repository: SqliteCategoriesRepository,
    unique_scope: UniqueScope,
}

impl SqliteCategoriesService {
    #[must_use]
    pub fn new(db: Db, unique_scope: UniqueScope) -> Self {
        Self {
            db,
            repository: SqliteCategoriesRepository::new(),
            unique_scope,
        }
    }

    /// Reference, then uniqueness checks for a row about to be written.
    async fn validate_row(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        row: &CategoryRow<'_>,
        excluding: Option<CategoryUuid>,
    ) -> Result<(), CategoriesServiceError> {
        if row.name.is_empty() {
            return Err(CategoriesServiceError::MissingRequiredData);
        }

        let mut unresolved = UnresolvedReferences::default();

        if !self.repository.company_exists(tx, row.company).await? {
            unresolved.company = Some(row.company);
        }

        if let Some(parent) = row.parent_category
            && !self.repository.category_exists(tx, parent).await?
        {
            unresolved.parent_category = Some(parent);
        }

        if !unresolved.is_empty() {
            return Err(CategoriesServiceError::UnresolvedReferences(unresolved));
        }

        if self
            .repository
            .name_taken(tx, self.unique_scope, row, excluding)
            .await?
        {
            return Err(CategoriesServiceError::AlreadyExists);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoriesService for SqliteCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    #[tracing::instrument(
        name = "categories.service.create_category",
        skip(self, category),
        fields(
            category_uuid = %category.uuid,
            company_uuid = %category.company,
            has_parent = category.parent_category.is_some()
        ),
        err
    )]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let row = CategoryRow {
            company: category.company,
            name: category.name.trim(),
            parent_category: category.parent_category,
        };

        let mut tx = self.db.begin_write().await?;

        self.validate_row(&mut tx, &row, None).await?;

        let created = self
            .repository
            .create_category(&mut tx, category.uuid, &row, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "categories.service.update_category",
        skip(self, category, update),
        fields(category_uuid = %category),
        err
    )]
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_write().await?;

        let current = self.repository.get_category(&mut tx, category).await?;

        let row = CategoryRow {
            company: update.company.unwrap_or(current.company),
            name: update.name.as_deref().unwrap_or(&current.name).trim(),
            parent_category: update.parent_category.apply(current.parent_category),
        };

        self.validate_row(&mut tx, &row, Some(category)).await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, &row, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(category_uuid = %category, "category removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories in insertion order.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a category after checking its references and name uniqueness.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Applies an update over the stored category and re-validates the result.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category. Children keep existing with no parent.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;
    use tokio::task::JoinSet;

    use crate::{
        domain::{
            categories::data::ParentUpdate,
            companies::records::CompanyUuid,
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_category_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CategoryUuid::new();

        let category = ctx
            .categories
            .create_category(NewCategory {
                uuid,
                company: ctx.company_uuid,
                name: "親カテゴリ".to_string(),
                parent_category: None,
            })
            .await?;

        assert_eq!(category.uuid, uuid);
        assert_eq!(category.company, ctx.company_uuid);
        assert_eq!(category.name, "親カテゴリ");
        assert_eq!(category.parent_category, None);
        assert_eq!(category.created_at, category.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_category_trims_name() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx.create_category("  新規カテゴリ\n", None).await?;

        assert_eq!(category.name, "新規カテゴリ");

        Ok(())
    }

    #[tokio::test]
    async fn create_category_blank_name_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.create_category(" \t ", None).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_category_with_parent_links_parent() -> TestResult {
        let ctx = TestContext::new().await;
        let parent = ctx.create_category("親カテゴリ", None).await?;

        let child = ctx
            .create_category("子カテゴリ", Some(parent.uuid))
            .await?;

        let fetched = ctx.categories.get_category(child.uuid).await?;

        assert_eq!(fetched.parent_category, Some(parent.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn create_category_reports_every_unresolved_reference() {
        let ctx = TestContext::new().await;
        let company = CompanyUuid::new();
        let parent = CategoryUuid::new();

        let result = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                company,
                name: "不正な親指定".to_string(),
                parent_category: Some(parent),
            })
            .await;

        let expected = UnresolvedReferences {
            company: Some(company),
            parent_category: Some(parent),
        };

        assert!(
            matches!(result, Err(CategoriesServiceError::UnresolvedReferences(ref refs)) if *refs == expected),
            "expected both references unresolved, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_category_duplicate_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("親カテゴリ", None).await?;

        let result = ctx.create_category("親カテゴリ", None).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_category_duplicate_name_is_checked_after_trimming() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("親カテゴリ", None).await?;

        let result = ctx.create_category(" 親カテゴリ ", None).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn same_name_in_another_company_is_allowed() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_company("Other社").await;

        ctx.create_category("共通", None).await?;

        let category = ctx
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                company: other,
                name: "共通".to_string(),
                parent_category: None,
            })
            .await?;

        assert_eq!(category.company, other);

        Ok(())
    }

    #[tokio::test]
    async fn company_scope_rejects_same_name_under_different_parents() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx.create_category("衣類", None).await?;
        let second = ctx.create_category("家電", None).await?;

        ctx.create_category("その他", Some(first.uuid)).await?;

        let result = ctx.create_category("その他", Some(second.uuid)).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn company_parent_scope_allows_same_name_under_different_parents() -> TestResult {
        let ctx = TestContext::with_scope(UniqueScope::CompanyParent).await;
        let first = ctx.create_category("衣類", None).await?;
        let second = ctx.create_category("家電", None).await?;

        ctx.create_category("その他", Some(first.uuid)).await?;
        ctx.create_category("その他", Some(second.uuid)).await?;

        let result = ctx.create_category("その他", Some(first.uuid)).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn company_parent_scope_treats_top_level_as_one_namespace() -> TestResult {
        let ctx = TestContext::with_scope(UniqueScope::CompanyParent).await;

        ctx.create_category("親カテゴリ", None).await?;

        let result = ctx.create_category("親カテゴリ", None).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unique_index_backstops_concurrent_duplicates() -> TestResult {
        let ctx = TestContext::new().await;
        let existing = ctx.create_category("親カテゴリ", None).await?;

        // Bypass the service check, as a racing writer would.
        let result = sqlx::query(
            "INSERT INTO categories (uuid, company_uuid, name, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?4)",
        )
        .bind(CategoryUuid::new().encode())
        .bind(existing.company.encode())
        .bind(existing.name.as_str())
        .bind(Timestamp::now().to_string())
        .execute(ctx.db.pool())
        .await
        .map_err(CategoriesServiceError::from);

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.get_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_categories_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let categories = ctx.categories.list_categories().await?;

        assert!(categories.is_empty(), "expected no categories");

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_returns_insertion_order() -> TestResult {
        let ctx = TestContext::new().await;

        let a = ctx.create_category("A", None).await?;
        let b = ctx.create_category("B", Some(a.uuid)).await?;
        let c = ctx.create_category("C", None).await?;

        let uuids: Vec<CategoryUuid> = ctx
            .categories
            .list_categories()
            .await?
            .iter()
            .map(|category| category.uuid)
            .collect();

        assert_eq!(uuids, vec![a.uuid, b.uuid, c.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn update_category_replaces_all_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_company("Other社").await;
        let parent = ctx.create_category("親カテゴリ", None).await?;
        let child = ctx.create_category("子カテゴリ", Some(parent.uuid)).await?;

        let updated = ctx
            .categories
            .update_category(
                child.uuid,
                CategoryUpdate {
                    company: Some(other),
                    name: Some("移動カテゴリ".to_string()),
                    parent_category: ParentUpdate::Cleared,
                },
            )
            .await?;

        assert_eq!(updated.uuid, child.uuid);
        assert_eq!(updated.company, other);
        assert_eq!(updated.name, "移動カテゴリ");
        assert_eq!(updated.parent_category, None);
        assert_eq!(updated.created_at, child.created_at);
        assert!(
            updated.updated_at >= child.updated_at,
            "updated_at should move forward"
        );

        Ok(())
    }

    #[tokio::test]
    async fn partial_update_changes_only_name() -> TestResult {
        let ctx = TestContext::new().await;
        let parent = ctx.create_category("親カテゴリ", None).await?;
        let child = ctx.create_category("子カテゴリ", Some(parent.uuid)).await?;

        let updated = ctx
            .categories
            .update_category(
                child.uuid,
                CategoryUpdate {
                    name: Some("部分更新カテゴリ".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "部分更新カテゴリ");
        assert_eq!(updated.company, child.company);
        assert_eq!(updated.parent_category, Some(parent.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn empty_update_refreshes_updated_at() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("親カテゴリ", None).await?;

        let updated = ctx
            .categories
            .update_category(category.uuid, CategoryUpdate::default())
            .await?;

        assert_eq!(updated.name, category.name);
        assert!(
            updated.updated_at >= category.updated_at,
            "updated_at should not move backwards"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_category_keeping_own_name_is_not_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("親カテゴリ", None).await?;

        let updated = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    company: Some(ctx.company_uuid),
                    name: Some("親カテゴリ".to_string()),
                    parent_category: ParentUpdate::Cleared,
                },
            )
            .await?;

        assert_eq!(updated.name, "親カテゴリ");

        Ok(())
    }

    #[tokio::test]
    async fn update_category_to_taken_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_category("親カテゴリ", None).await?;

        let other = ctx.create_category("別カテゴリ", None).await?;

        let result = ctx
            .categories
            .update_category(
                other.uuid,
                CategoryUpdate {
                    name: Some("親カテゴリ".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_category_unknown_company_is_unresolved() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("親カテゴリ", None).await?;
        let company = CompanyUuid::new();

        let result = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    company: Some(company),
                    name: Some("更新失敗カテゴリ".to_string()),
                    parent_category: ParentUpdate::Unchanged,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CategoriesServiceError::UnresolvedReferences(UnresolvedReferences {
                    company: Some(unresolved),
                    parent_category: None,
                })) if unresolved == company
            ),
            "expected unresolved company, got {result:?}"
        );

        let unchanged = ctx.categories.get_category(category.uuid).await?;

        assert_eq!(unchanged.name, "親カテゴリ");

        Ok(())
    }

    #[tokio::test]
    async fn update_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .update_category(CategoryUuid::new(), CategoryUpdate::default())
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn category_may_be_its_own_parent() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("循環", None).await?;

        let updated = ctx
            .categories
            .update_category(
                category.uuid,
                CategoryUpdate {
                    parent_category: ParentUpdate::Set(category.uuid),
                    ..CategoryUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.parent_category, Some(category.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("親カテゴリ", None).await?;

        ctx.categories.delete_category(category.uuid).await?;

        let result = ctx.categories.get_category(category.uuid).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_category_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.categories.delete_category(CategoryUuid::new()).await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleting_parent_detaches_children() -> TestResult {
        let ctx = TestContext::new().await;
        let parent = ctx.create_category("親カテゴリ", None).await?;
        let child = ctx.create_category("子カテゴリ", Some(parent.uuid)).await?;

        ctx.categories.delete_category(parent.uuid).await?;

        let orphan = ctx.categories.get_category(child.uuid).await?;

        assert_eq!(orphan.parent_category, None);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_name_can_be_reused() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.create_category("親カテゴリ", None).await?;

        ctx.categories.delete_category(category.uuid).await?;

        let recreated = ctx.create_category("親カテゴリ", None).await?;

        assert_ne!(recreated.uuid, category.uuid);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_on_disk_succeed_or_report_duplicates() -> TestResult {
        let ctx = Arc::new(TestContext::on_disk(UniqueScope::Company).await);
        let mut tasks = JoinSet::new();

        for index in 0..40 {
            let ctx = Arc::clone(&ctx);
            let name = if index % 2 == 0 {
                "重複カテゴリ".to_string()
            } else {
                format!("カテゴリ{index}")
            };

            tasks.spawn(async move { ctx.create_category(&name, None).await });
        }

        let mut created = 0;
        let mut duplicates = 0;
        let mut unexpected = Vec::new();

        while let Some(result) = tasks.join_next().await {
            match result? {
                Ok(_) => created += 1,
                Err(CategoriesServiceError::AlreadyExists) => duplicates += 1,
                Err(error) => unexpected.push(format!("{error:?}")),
            }
        }

        assert!(unexpected.is_empty(), "unexpected errors: {unexpected:?}");
        assert_eq!(created, 21);
        assert_eq!(duplicates, 19);
        assert_eq!(ctx.categories.list_categories().await?.len(), 21);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_renames_on_disk_keep_one_winner() -> TestResult {
        let ctx = Arc::new(TestContext::on_disk(UniqueScope::Company).await);
        let mut categories = Vec::new();

        for index in 0..10 {
            categories.push(ctx.create_category(&format!("カテゴリ{index}"), None).await?);
        }

        let mut tasks = JoinSet::new();

        for category in categories {
            let ctx = Arc::clone(&ctx);

            tasks.spawn(async move {
                ctx.categories
                    .update_category(
                        category.uuid,
                        CategoryUpdate {
                            name: Some("同名カテゴリ".to_string()),
                            ..CategoryUpdate::default()
                        },
                    )
                    .await
            });
        }

        let mut renamed = 0;
        let mut duplicates = 0;
        let mut unexpected = Vec::new();

        while let Some(result) = tasks.join_next().await {
            match result? {
                Ok(_) => renamed += 1,
                Err(CategoriesServiceError::AlreadyExists) => duplicates += 1,
                Err(error) => unexpected.push(format!("{error:?}")),
            }
        }

        assert!(unexpected.is_empty(), "unexpected errors: {unexpected:?}");
        assert_eq!(renamed, 1);
        assert_eq!(duplicates, 9);

        Ok(())
    }
}
