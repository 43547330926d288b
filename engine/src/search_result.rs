use crate::entity::Entity;
use serde::Serialize;
use serde_json::{Value, json};

/// One page of search results plus the metadata needed to page through the rest.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SearchResult<E> {
    pub items: Vec<E>,
    /// Matching items before pagination.
    pub total: u64,
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

impl<E> SearchResult<E> {
    pub fn new(items: Vec<E>, total: u64, current_page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page: last_page(total, per_page),
        }
    }

    pub fn map_items<T, M>(self, mapper: M) -> SearchResult<T>
    where
        M: FnMut(E) -> T,
    {
        SearchResult {
            items: self.items.into_iter().map(mapper).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }
}

impl<E> SearchResult<E>
where
    E: Entity + Serialize,
{
    /// With `detailed`, every item goes through [`Entity::to_json`];
    /// otherwise items are serialized as they are.
    pub fn to_json(&self, detailed: bool) -> serde_json::Result<Value> {
        let items = if detailed {
            Value::Array(self.items.iter().map(Entity::to_json).collect())
        } else {
            serde_json::to_value(&self.items)?
        };

        Ok(json!({
            "items": items,
            "total": self.total,
            "current_page": self.current_page,
            "per_page": self.per_page,
            "last_page": self.last_page,
        }))
    }
}

/// `ceil(total / per_page)`, never below 1.
fn last_page(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}
