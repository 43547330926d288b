use crate::postgres::statements::{self, SORTABLE_FIELDS};
use categories_core::model::{Category, CategoryId};
use categories_core::{CategoryFilter, DEFAULT_SORT_FIELD};
use deadpool_postgres::{Object, Pool};
use engine::{
    Entity, RepoError, RepoResult, Repository, SearchParams, SearchResult, SearchableRepository,
    SortDirection,
};
use error_stack::{Report, ResultExt};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tokio_stream::StreamExt;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CategoryRepo {
    pool: Pool,
}

impl CategoryRepo {
    /// Checks out one connection so a bad pool fails here instead of on first use.
    pub async fn new(pool: Pool) -> RepoResult<Self> {
        drop(pool.get().await.change_context(RepoError::Storage)?);
        Ok(Self { pool })
    }

    async fn client(&self) -> RepoResult<Object> {
        self.pool
            .get()
            .await
            .change_context(RepoError::Storage)
            .attach("failed to get a connection from the pool")
    }
}

fn invalid() -> RepoError {
    RepoError::InvalidData {
        entity: Category::NAME,
    }
}

fn row_to_category(row: Row) -> RepoResult<Category> {
    let category = Category::new(
        CategoryId::from(row.try_get::<_, Uuid>("category_id").change_context(invalid())?),
        row.try_get("name").change_context(invalid())?,
        row.try_get("description").change_context(invalid())?,
        row.try_get("is_active").change_context(invalid())?,
        row.try_get("created_at").change_context(invalid())?,
    );

    validated(category)
}

/// Persisted rows are not trusted: the name rules run again on the way out.
fn validated(category: Category) -> RepoResult<Category> {
    category
        .validate()
        .change_context(invalid())
        .attach_with(|| format!("category id {}", category.category_id()))?;

    Ok(category)
}

fn rows_to_categories(rows: Vec<Row>) -> RepoResult<Vec<Category>> {
    rows.into_iter().map(row_to_category).collect()
}

fn order_by(params: &SearchParams<CategoryFilter>) -> (&'static str, SortDirection) {
    params
        .sort()
        .and_then(|sort| SORTABLE_FIELDS.iter().find(|f| **f == sort))
        .map(|field| (*field, params.sort_dir().unwrap_or(SortDirection::Desc)))
        .unwrap_or((DEFAULT_SORT_FIELD, SortDirection::Desc))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl Repository<Category> for CategoryRepo {
    #[instrument(skip_all, name = "CategoryRepo#insert")]
    async fn insert(&mut self, category: Category) -> RepoResult<()> {
        let client = self.client().await?;
        let stmt = client
            .prepare_cached(statements::INSERT)
            .await
            .change_context(RepoError::Storage)?;

        client
            .execute(
                &stmt,
                &[
                    category.category_id().as_uuid(),
                    &category.name(),
                    &category.description(),
                    &category.is_active(),
                    &category.created_at(),
                ],
            )
            .await
            .change_context(RepoError::Storage)
            .attach_with(|| format!("failed to insert category {}", category.category_id()))?;
        Ok(())
    }

    #[instrument(skip_all, name = "CategoryRepo#bulk_insert")]
    async fn bulk_insert(&mut self, categories: Vec<Category>) -> RepoResult<()> {
        let mut client = self.client().await?;
        let tx = client
            .transaction()
            .await
            .change_context(RepoError::Storage)?;
        let stmt = tx
            .prepare_cached(statements::INSERT)
            .await
            .change_context(RepoError::Storage)?;

        for category in &categories {
            tx.execute(
                &stmt,
                &[
                    category.category_id().as_uuid(),
                    &category.name(),
                    &category.description(),
                    &category.is_active(),
                    &category.created_at(),
                ],
            )
            .await
            .change_context(RepoError::Storage)
            .attach_with(|| format!("failed to insert category {}", category.category_id()))?;
        }

        tx.commit().await.change_context(RepoError::Storage)?;
        debug!(count = categories.len(), "categories inserted");
        Ok(())
    }

    #[instrument(skip_all, name = "CategoryRepo#update")]
    async fn update(&mut self, category: Category) -> RepoResult<()> {
        let client = self.client().await?;
        let stmt = client
            .prepare_cached(statements::UPDATE)
            .await
            .change_context(RepoError::Storage)?;

        let updated = client
            .execute(
                &stmt,
                &[
                    category.category_id().as_uuid(),
                    &category.name(),
                    &category.description(),
                    &category.is_active(),
                    &category.created_at(),
                ],
            )
            .await
            .change_context(RepoError::Storage)?;

        if updated == 0 {
            return Err(Report::new(RepoError::not_found(
                category.category_id(),
                Category::NAME,
            )));
        }
        Ok(())
    }

    #[instrument(skip_all, name = "CategoryRepo#delete")]
    async fn delete(&mut self, id: &CategoryId) -> RepoResult<()> {
        let client = self.client().await?;
        let stmt = client
            .prepare_cached(statements::DELETE)
            .await
            .change_context(RepoError::Storage)?;

        let deleted = client
            .execute(&stmt, &[id.as_uuid()])
            .await
            .change_context(RepoError::Storage)?;

        if deleted == 0 {
            return Err(Report::new(RepoError::not_found(id, Category::NAME)));
        }
        Ok(())
    }

    #[instrument(skip_all, name = "CategoryRepo#find_by_id")]
    async fn find_by_id(&self, id: &CategoryId) -> RepoResult<Option<Category>> {
        let client = self.client().await?;
        let stmt = client
            .prepare_cached(statements::GET)
            .await
            .change_context(RepoError::Storage)?;

        client
            .query_opt(&stmt, &[id.as_uuid()])
            .await
            .change_context(RepoError::Storage)?
            .map(row_to_category)
            .transpose()
    }

    #[instrument(skip_all, name = "CategoryRepo#find_all")]
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let client = self.client().await?;
        let stmt = client
            .prepare_cached(statements::LIST)
            .await
            .change_context(RepoError::Storage)?;

        let rows = client
            .query(&stmt, &[])
            .await
            .change_context(RepoError::Storage)?;

        rows_to_categories(rows)
    }
}

impl SearchableRepository<Category> for CategoryRepo {
    type Filter = CategoryFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        SORTABLE_FIELDS
    }

    #[instrument(skip_all, name = "CategoryRepo#search")]
    async fn search(
        &self,
        params: SearchParams<CategoryFilter>,
    ) -> RepoResult<SearchResult<Category>> {
        let pattern = params
            .filter()
            .map(String::as_str)
            .map(statements::contains_pattern);
        let (column, direction) = order_by(&params);
        let offset = to_i64(params.page().saturating_sub(1).saturating_mul(params.per_page()));
        let limit = to_i64(params.per_page());

        let client = self.client().await?;
        let count_stmt = client
            .prepare_cached(statements::COUNT_MATCHING)
            .await
            .change_context(RepoError::Storage)?;
        let search_stmt = client
            .prepare_cached(&statements::search(column, &direction.to_string()))
            .await
            .change_context(RepoError::Storage)?;

        let total: i64 = client
            .query_one(&count_stmt, &[&pattern])
            .await
            .change_context(RepoError::Storage)?
            .try_get("total")
            .change_context(RepoError::Storage)?;

        let search_params: [&(dyn ToSql + Sync); 3] = [&pattern, &offset, &limit];
        let rows = client
            .query_raw(&search_stmt, search_params)
            .await
            .change_context(RepoError::Storage)?
            .collect::<Result<Vec<_>, _>>()
            .await
            .change_context(RepoError::Storage)?;

        debug!(total, returned = rows.len(), column, %direction, "postgres search");

        Ok(SearchResult::new(
            rows_to_categories(rows)?,
            u64::try_from(total).unwrap_or_default(),
            params.page(),
            params.per_page(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use categories_core::fake::CategoryFakeBuilder;
    use engine::EntityValidationError;

    #[test]
    fn invalid_row_is_invalid_data_with_field_errors() {
        let category = CategoryFakeBuilder::one()
            .with_invalid_name_empty()
            .build_one();

        let err = validated(category).unwrap_err();

        assert_eq!(
            &RepoError::InvalidData { entity: "Category" },
            err.current_context()
        );
        let validation = err
            .downcast_ref::<EntityValidationError>()
            .expect("validation error is attached");
        assert_eq!(
            Some(&["name should not be empty".to_string()][..]),
            validation.errors().get("name")
        );
    }

    #[test]
    fn valid_row_passes_through() {
        let category = CategoryFakeBuilder::one().build_one();

        let checked = validated(category.clone()).unwrap();

        assert_eq!(category, checked);
        assert_eq!(category.name(), checked.name());
    }

    #[test]
    fn order_by_uses_requested_sortable_field() {
        let params = SearchParams::<CategoryFilter>::new()
            .with_sort("name")
            .with_sort_dir(SortDirection::Asc);

        assert_eq!(("name", SortDirection::Asc), order_by(&params));
    }

    #[test]
    fn order_by_falls_back_to_newest_first() {
        let unknown = SearchParams::<CategoryFilter>::new().with_sort("description");
        let missing = SearchParams::<CategoryFilter>::new();

        assert_eq!(("created_at", SortDirection::Desc), order_by(&unknown));
        assert_eq!(("created_at", SortDirection::Desc), order_by(&missing));
    }

    #[test]
    fn sort_without_direction_is_descending() {
        let params = SearchParams::<CategoryFilter>::new().with_sort("created_at");

        assert_eq!(("created_at", SortDirection::Desc), order_by(&params));
    }
}
