use engine::{SearchParams, SearchResult, SearchableRepository};
use model::Category;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod model;

pub use model::{CategoryId, NAME_MAX_LENGTH, NewCategory};

/// Free-form text matched against category names.
pub type CategoryFilter = String;
pub type CategorySearchParams = SearchParams<CategoryFilter>;
pub type CategorySearchResult = SearchResult<Category>;

/// Default ordering when no valid sort field was requested.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

pub trait CategoryRepository:
    SearchableRepository<Category, Filter = CategoryFilter> + Send + Sync
{
}

impl<T> CategoryRepository for T where
    T: SearchableRepository<Category, Filter = CategoryFilter> + Send + Sync
{
}
