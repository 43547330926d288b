//! Test data for categories.
//!
//! Every property can be overridden with a closure that receives the index of
//! the category being built, so `many(3).with_name(|i| format!("c{i}"))`
//! yields `c0`, `c1`, `c2`. Properties left alone get valid defaults.

use crate::model::{Category, CategoryId, NAME_MAX_LENGTH};
use chrono::{DateTime, SubsecRound, Utc};

type PropFactory<T> = Box<dyn Fn(usize) -> T>;

pub struct CategoryFakeBuilder {
    count: usize,
    category_id: Option<PropFactory<CategoryId>>,
    name: PropFactory<String>,
    description: PropFactory<Option<String>>,
    is_active: PropFactory<bool>,
    created_at: Option<PropFactory<DateTime<Utc>>>,
}

impl CategoryFakeBuilder {
    pub fn one() -> Self {
        Self::many(1)
    }

    pub fn many(count: usize) -> Self {
        Self {
            count,
            category_id: None,
            name: Box::new(|i| format!("Category {i}")),
            description: Box::new(|i| Some(format!("Description of category {i}"))),
            is_active: Box::new(|_| true),
            created_at: None,
        }
    }

    pub fn with_category_id(mut self, f: impl Fn(usize) -> CategoryId + 'static) -> Self {
        self.category_id = Some(Box::new(f));
        self
    }

    pub fn with_name(mut self, f: impl Fn(usize) -> String + 'static) -> Self {
        self.name = Box::new(f);
        self
    }

    pub fn with_description(mut self, f: impl Fn(usize) -> Option<String> + 'static) -> Self {
        self.description = Box::new(f);
        self
    }

    pub fn with_created_at(mut self, f: impl Fn(usize) -> DateTime<Utc> + 'static) -> Self {
        self.created_at = Some(Box::new(f));
        self
    }

    pub fn activate(mut self) -> Self {
        self.is_active = Box::new(|_| true);
        self
    }

    pub fn deactivate(mut self) -> Self {
        self.is_active = Box::new(|_| false);
        self
    }

    pub fn with_invalid_name_too_long(self) -> Self {
        self.with_name(|_| "a".repeat(NAME_MAX_LENGTH + 1))
    }

    pub fn with_invalid_name_empty(self) -> Self {
        self.with_name(|_| String::new())
    }

    pub fn build(&self) -> Vec<Category> {
        (0..self.count).map(|i| self.build_at(i)).collect()
    }

    pub fn build_one(&self) -> Category {
        self.build_at(0)
    }

    fn build_at(&self, index: usize) -> Category {
        Category::new(
            self.category_id
                .as_ref()
                .map(|f| f(index))
                .unwrap_or_default(),
            (self.name)(index),
            (self.description)(index),
            (self.is_active)(index),
            self.created_at
                .as_ref()
                .map(|f| f(index))
                .unwrap_or_else(|| Utc::now().trunc_subsecs(3)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn defaults_produce_valid_distinct_categories() {
        let categories = CategoryFakeBuilder::many(3).build();

        assert_eq!(3, categories.len());
        assert!(categories.iter().all(|c| c.validate().is_ok()));
        assert_ne!(categories[0], categories[1]);
        assert_eq!("Category 2", categories[2].name());
    }

    #[test]
    fn factories_receive_the_index() {
        let base = Utc::now().trunc_subsecs(3);
        let categories = CategoryFakeBuilder::many(2)
            .with_name(|i| format!("test {i}"))
            .with_description(|_| None)
            .with_created_at(move |i| base + TimeDelta::milliseconds(i as i64))
            .deactivate()
            .build();

        assert_eq!("test 1", categories[1].name());
        assert_eq!(None, categories[1].description());
        assert!(!categories[0].is_active());
        assert_eq!(base + TimeDelta::milliseconds(1), categories[1].created_at());
    }

    #[test]
    fn fixed_id_is_used() {
        let id = CategoryId::new();

        let category = CategoryFakeBuilder::one()
            .with_category_id(move |_| id)
            .build_one();

        assert_eq!(&id, category.category_id());
    }

    #[test]
    fn invalid_name_helpers_fail_validation() {
        assert!(
            CategoryFakeBuilder::one()
                .with_invalid_name_too_long()
                .build_one()
                .validate()
                .is_err()
        );
        assert!(
            CategoryFakeBuilder::one()
                .with_invalid_name_empty()
                .build_one()
                .validate()
                .is_err()
        );
    }
}
