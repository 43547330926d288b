use crate::ServiceResult;
use crate::error::{CategoryServiceError, from_repo};
use crate::output::CategoryOutput;
use crate::use_cases::parse_id;
use categories_core::CategoryRepository;
use engine::Repository;
use error_stack::Report;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCategoryInput {
    pub id: String,
}

pub struct GetCategoryUseCase<R> {
    repo: R,
}

impl<R> GetCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, name = "category#get")]
    pub async fn execute(&self, input: GetCategoryInput) -> ServiceResult<CategoryOutput> {
        let id = parse_id(&input.id)?;

        self.repo
            .find_by_id(&id)
            .await
            .map_err(from_repo)?
            .map(CategoryOutput::from)
            .ok_or_else(|| Report::new(CategoryServiceError::not_found(id)))
    }
}
