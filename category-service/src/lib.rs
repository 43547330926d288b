use error_stack::Report;

pub type ServiceResult<T> = Result<T, Report<CategoryServiceError>>;

pub mod error;
pub mod output;
pub mod use_cases;

pub use error::CategoryServiceError;
pub use output::{CategoryOutput, PaginationOutput};
pub use use_cases::create::{CreateCategoryInput, CreateCategoryUseCase};
pub use use_cases::delete::{DeleteCategoryInput, DeleteCategoryUseCase};
pub use use_cases::get::{GetCategoryInput, GetCategoryUseCase};
pub use use_cases::list::{ListCategoriesInput, ListCategoriesUseCase};
pub use use_cases::update::{UpdateCategoryInput, UpdateCategoryUseCase};
