use crate::entity::Entity;
use crate::error::RepoResult;
use crate::search_params::SearchParams;
use crate::search_result::SearchResult;

/// Basic persistence capabilities for one entity type.
///
/// Mutating operations take `&mut self`: a repository instance serves one
/// caller at a time and owns its backing store.
pub trait Repository<E: Entity> {
    /// Appends without checking for an existing identifier.
    fn insert(&mut self, entity: E) -> impl Future<Output = RepoResult<()>> + Send;

    fn bulk_insert(&mut self, entities: Vec<E>) -> impl Future<Output = RepoResult<()>> + Send;

    /// Replaces the stored entity with the same identifier.
    /// Fails with [`crate::RepoError::NotFound`] when there is none.
    fn update(&mut self, entity: E) -> impl Future<Output = RepoResult<()>> + Send;

    /// Fails with [`crate::RepoError::NotFound`] when `id` is not stored.
    fn delete(&mut self, id: &E::Id) -> impl Future<Output = RepoResult<()>> + Send;

    fn find_by_id(&self, id: &E::Id) -> impl Future<Output = RepoResult<Option<E>>> + Send;

    fn find_all(&self) -> impl Future<Output = RepoResult<Vec<E>>> + Send;

    fn entity_name(&self) -> &'static str {
        E::NAME
    }
}

/// A [`Repository`] that can filter, sort and paginate in one query.
pub trait SearchableRepository<E: Entity>: Repository<E> {
    type Filter: Send + Sync;

    /// Field names accepted as an explicit sort key.
    fn sortable_fields(&self) -> &[&'static str];

    fn search(
        &self,
        params: SearchParams<Self::Filter>,
    ) -> impl Future<Output = RepoResult<SearchResult<E>>> + Send;
}

impl<E, R> Repository<E> for &mut R
where
    E: Entity,
    R: Repository<E> + Send + Sync,
{
    async fn insert(&mut self, entity: E) -> RepoResult<()> {
        (**self).insert(entity).await
    }

    async fn bulk_insert(&mut self, entities: Vec<E>) -> RepoResult<()> {
        (**self).bulk_insert(entities).await
    }

    async fn update(&mut self, entity: E) -> RepoResult<()> {
        (**self).update(entity).await
    }

    async fn delete(&mut self, id: &E::Id) -> RepoResult<()> {
        (**self).delete(id).await
    }

    async fn find_by_id(&self, id: &E::Id) -> RepoResult<Option<E>> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> RepoResult<Vec<E>> {
        (**self).find_all().await
    }

    fn entity_name(&self) -> &'static str {
        (**self).entity_name()
    }
}

impl<E, R> SearchableRepository<E> for &mut R
where
    E: Entity,
    R: SearchableRepository<E> + Send + Sync,
{
    type Filter = R::Filter;

    fn sortable_fields(&self) -> &[&'static str] {
        (**self).sortable_fields()
    }

    async fn search(&self, params: SearchParams<Self::Filter>) -> RepoResult<SearchResult<E>> {
        (**self).search(params).await
    }
}
