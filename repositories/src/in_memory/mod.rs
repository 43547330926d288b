use engine::{
    Entity, RepoError, RepoResult, Repository, SearchParams, SearchResult, SearchableRepository,
    SortDirection,
};
use error_stack::Report;
use std::cmp::Ordering;
use tracing::debug;

pub mod categories;

/// Per-entity search behaviour plugged into [`InMemoryRepository`].
pub trait SearchStrategy<E>: Send + Sync {
    type Filter: Send + Sync;

    fn sortable_fields(&self) -> &[&'static str];

    fn matches(&self, entity: &E, filter: &Self::Filter) -> bool;

    /// Ascending comparison on `field`. Only called with a sortable field or
    /// the field named by [`SearchStrategy::default_order`].
    fn compare(&self, field: &str, a: &E, b: &E) -> Ordering;

    /// Ordering used when no valid sort field was requested.
    /// `None` keeps insertion order.
    fn default_order(&self) -> Option<(&'static str, SortDirection)> {
        None
    }
}

/// Vec-backed repository. Search runs filter, then a stable sort, then
/// pagination over a snapshot of the items on every call.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<E, S> {
    items: Vec<E>,
    strategy: S,
}

impl<E, S> Default for InMemoryRepository<E, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<E, S> InMemoryRepository<E, S> {
    pub fn new(strategy: S) -> Self {
        Self {
            items: Vec::new(),
            strategy,
        }
    }

    pub fn with_items(strategy: S, items: Vec<E>) -> Self {
        Self { items, strategy }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }
}

impl<E, S> InMemoryRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    fn position(&self, id: &E::Id) -> Option<usize> {
        self.items.iter().position(|e| e.entity_id() == id)
    }

    fn not_found(id: &E::Id) -> Report<RepoError> {
        Report::new(RepoError::not_found(id, E::NAME))
    }

    fn apply_filter<'a>(&self, items: &'a [E], filter: Option<&S::Filter>) -> Vec<&'a E> {
        match filter {
            None => items.iter().collect(),
            Some(filter) => items
                .iter()
                .filter(|e| self.strategy.matches(e, filter))
                .collect(),
        }
    }

    fn apply_sort(&self, items: &mut [&E], sort: Option<&str>, sort_dir: Option<SortDirection>) {
        let requested = sort
            .filter(|field| self.strategy.sortable_fields().iter().any(|f| f == field))
            .map(|field| (field, sort_dir.unwrap_or(SortDirection::Desc)));

        let Some((field, direction)) = requested.or_else(|| self.strategy.default_order()) else {
            return;
        };

        items.sort_by(|a, b| {
            let ordering = self.strategy.compare(field, a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    fn apply_paginate<'a>(items: &[&'a E], page: u64, per_page: u64) -> Vec<&'a E> {
        let per_page = usize::try_from(per_page).unwrap_or(usize::MAX);
        let offset = usize::try_from(page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(per_page);

        items.iter().skip(offset).take(per_page).copied().collect()
    }
}

impl<E, S> Repository<E> for InMemoryRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    async fn insert(&mut self, entity: E) -> RepoResult<()> {
        self.items.push(entity);
        Ok(())
    }

    async fn bulk_insert(&mut self, entities: Vec<E>) -> RepoResult<()> {
        self.items.extend(entities);
        Ok(())
    }

    async fn update(&mut self, entity: E) -> RepoResult<()> {
        let index = self
            .position(entity.entity_id())
            .ok_or_else(|| Self::not_found(entity.entity_id()))?;

        if let Some(slot) = self.items.get_mut(index) {
            *slot = entity;
        }
        Ok(())
    }

    async fn delete(&mut self, id: &E::Id) -> RepoResult<()> {
        let index = self.position(id).ok_or_else(|| Self::not_found(id))?;

        self.items.remove(index);
        Ok(())
    }

    async fn find_by_id(&self, id: &E::Id) -> RepoResult<Option<E>> {
        Ok(self.items.iter().find(|e| e.entity_id() == id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<E>> {
        Ok(self.items.clone())
    }
}

impl<E, S> SearchableRepository<E> for InMemoryRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    type Filter = S::Filter;

    fn sortable_fields(&self) -> &[&'static str] {
        self.strategy.sortable_fields()
    }

    async fn search(&self, params: SearchParams<Self::Filter>) -> RepoResult<SearchResult<E>> {
        let mut filtered = self.apply_filter(&self.items, params.filter());
        self.apply_sort(&mut filtered, params.sort(), params.sort_dir());
        let page = Self::apply_paginate(&filtered, params.page(), params.per_page());

        debug!(
            entity = E::NAME,
            matched = filtered.len(),
            returned = page.len(),
            "in-memory search"
        );

        Ok(SearchResult::new(
            page.into_iter().cloned().collect(),
            filtered.len() as u64,
            params.page(),
            params.per_page(),
        ))
    }
}
