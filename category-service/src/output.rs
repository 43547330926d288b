use categories_core::CategorySearchResult;
use categories_core::model::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Flat view of a category handed back by every use case.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryOutput {
    fn from(category: Category) -> Self {
        Self {
            id: category.category_id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

impl From<CategorySearchResult> for PaginationOutput<CategoryOutput> {
    fn from(result: CategorySearchResult) -> Self {
        let result = result.map_items(CategoryOutput::from);
        Self {
            items: result.items,
            total: result.total,
            current_page: result.current_page,
            per_page: result.per_page,
            last_page: result.last_page,
        }
    }
}
