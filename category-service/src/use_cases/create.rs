use crate::ServiceResult;
use crate::error::{from_repo, from_validation};
use crate::output::CategoryOutput;
use categories_core::model::Category;
use categories_core::{CategoryRepository, NewCategory};
use engine::Repository;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct CreateCategoryUseCase<R> {
    repo: R,
}

impl<R> CreateCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, name = "category#create")]
    pub async fn execute(&mut self, input: CreateCategoryInput) -> ServiceResult<CategoryOutput> {
        let category = Category::create(NewCategory {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
        })
        .map_err(from_validation)?;

        self.repo
            .insert(category.clone())
            .await
            .map_err(from_repo)?;

        debug!(id = %category.category_id(), "category created");
        Ok(category.into())
    }
}
