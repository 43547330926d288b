use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<RepoError>>;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum RepoError {
    #[error("{entity} not found using id {id}")]
    NotFound { id: String, entity: &'static str },
    /// The backing store failed. The underlying error is kept in the report.
    #[error("storage operation failed")]
    Storage,
    /// A persisted record could not be turned back into a valid entity.
    #[error("persisted {entity} data is invalid")]
    InvalidData { entity: &'static str },
}

impl RepoError {
    pub fn not_found(id: impl ToString, entity: &'static str) -> Self {
        Self::NotFound {
            id: id.to_string(),
            entity,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
