use crate::ServiceResult;
use crate::error::from_repo;
use crate::output::{CategoryOutput, PaginationOutput};
use categories_core::{CategoryFilter, CategoryRepository, CategorySearchParams};
use engine::{SearchParamsInput, SearchableRepository};
use tracing::instrument;

/// Raw paging, sorting and filtering values. Normalized before the search runs.
pub type ListCategoriesInput = SearchParamsInput<CategoryFilter>;

pub struct ListCategoriesUseCase<R> {
    repo: R,
}

impl<R> ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, name = "category#list")]
    pub async fn execute(
        &self,
        input: ListCategoriesInput,
    ) -> ServiceResult<PaginationOutput<CategoryOutput>> {
        let params = CategorySearchParams::from(input);

        let result = self.repo.search(params).await.map_err(from_repo)?;

        Ok(result.into())
    }
}
