pub mod entity;
pub mod error;
pub mod id;
pub mod logging;
pub mod repository;
pub mod search_params;
pub mod search_result;
pub mod validation;

pub use entity::Entity;
pub use error::{RepoError, RepoResult};
pub use id::{EntityId, Identifier, InvalidUuidError};
pub use repository::{Repository, SearchableRepository};
pub use search_params::{SearchParams, SearchParamsInput, SortDirection};
pub use search_result::SearchResult;
pub use validation::{EntityValidationError, FieldErrors};
