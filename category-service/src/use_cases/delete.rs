use crate::ServiceResult;
use crate::error::from_repo;
use crate::use_cases::parse_id;
use categories_core::CategoryRepository;
use engine::Repository;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCategoryInput {
    pub id: String,
}

pub struct DeleteCategoryUseCase<R> {
    repo: R,
}

impl<R> DeleteCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[instrument(skip_all, name = "category#delete")]
    pub async fn execute(&mut self, input: DeleteCategoryInput) -> ServiceResult<()> {
        let id = parse_id(&input.id)?;

        self.repo.delete(&id).await.map_err(from_repo)?;

        debug!(%id, "category deleted");
        Ok(())
    }
}
