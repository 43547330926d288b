use crate::ServiceResult;
use crate::error::CategoryServiceError;
use categories_core::CategoryId;
use error_stack::ResultExt;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

/// Rejects malformed ids before any repository call.
fn parse_id(id: &str) -> ServiceResult<CategoryId> {
    CategoryId::parse(id)
        .change_context(CategoryServiceError::InvalidId)
        .attach_with(|| format!("received id '{id}'"))
}
