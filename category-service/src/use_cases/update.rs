use crate::ServiceResult;
use crate::error::{CategoryServiceError, from_repo, from_validation};
use crate::output::CategoryOutput;
use crate::use_cases::parse_id;
use categories_core::CategoryRepository;
use engine::Repository;
use error_stack::Report;
use optional_field::Field;
use tracing::{debug, instrument};

/// `description` tells "leave as is" (`Missing`) apart from "clear it"
/// (`Present(None)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryInput {
    pub id: String,
    pub name: Option<String>,
    pub description: Field<String>,
    pub is_active: Option<bool>,
}

impl UpdateCategoryInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: Field::Missing,
            is_active: None,
        }
    }
}

pub struct UpdateCategoryUseCase<R> {
    repo: R,
}

impl<R> UpdateCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, name = "category#update")]
    pub async fn execute(&mut self, input: UpdateCategoryInput) -> ServiceResult<CategoryOutput> {
        let id = parse_id(&input.id)?;

        let mut category = self
            .repo
            .find_by_id(&id)
            .await
            .map_err(from_repo)?
            .ok_or_else(|| Report::new(CategoryServiceError::not_found(id)))?;

        if let Some(name) = input.name {
            category.change_name(name).map_err(from_validation)?;
        }
        if let Field::Present(description) = input.description {
            category.change_description(description);
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }

        self.repo
            .update(category.clone())
            .await
            .map_err(from_repo)?;

        debug!(%id, "category updated");
        Ok(category.into())
    }
}
