use crate::in_memory::{InMemoryRepository, SearchStrategy};
use categories_core::model::Category;
use categories_core::{CategoryFilter, DEFAULT_SORT_FIELD};
use engine::SortDirection;
use std::cmp::Ordering;

pub type CategoryInMemoryRepository = InMemoryRepository<Category, CategorySearch>;

/// Name filter (case-insensitive substring), `name` as the only explicit sort
/// key and newest-first as the default order.
#[derive(Debug, Default, Clone, Copy)]
pub struct CategorySearch;

impl SearchStrategy<Category> for CategorySearch {
    type Filter = CategoryFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        &["name"]
    }

    fn matches(&self, category: &Category, filter: &CategoryFilter) -> bool {
        category
            .name()
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }

    fn compare(&self, field: &str, a: &Category, b: &Category) -> Ordering {
        match field {
            "name" => a.name().cmp(b.name()),
            "created_at" => a.created_at().cmp(&b.created_at()),
            _ => Ordering::Equal,
        }
    }

    fn default_order(&self) -> Option<(&'static str, SortDirection)> {
        Some((DEFAULT_SORT_FIELD, SortDirection::Desc))
    }
}
