use categories_core::model::Category;
use engine::{Entity, EntityValidationError, FieldErrors, RepoError};
use error_stack::Report;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CategoryServiceError {
    #[error("ID must be a valid UUID")]
    InvalidId,
    #[error("category is invalid ({0})")]
    Validation(FieldErrors),
    #[error("{entity} not found using id {id}")]
    NotFound { id: String, entity: &'static str },
    #[error("category storage failed")]
    Storage,
}

impl CategoryServiceError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound {
            id: id.to_string(),
            entity: Category::NAME,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<&EntityValidationError> for CategoryServiceError {
    fn from(err: &EntityValidationError) -> Self {
        Self::Validation(err.errors().clone())
    }
}

/// Keeps the repository report as the cause and picks the matching service kind.
pub(crate) fn from_repo(report: Report<RepoError>) -> Report<CategoryServiceError> {
    let context = match report.current_context() {
        RepoError::NotFound { id, entity } => CategoryServiceError::NotFound {
            id: id.clone(),
            entity: *entity,
        },
        RepoError::Storage | RepoError::InvalidData { .. } => CategoryServiceError::Storage,
    };
    report.change_context(context)
}

pub(crate) fn from_validation(err: EntityValidationError) -> Report<CategoryServiceError> {
    let context = CategoryServiceError::from(&err);
    Report::new(err).change_context(context)
}
