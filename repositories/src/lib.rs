pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::categories::{CategoryInMemoryRepository, CategorySearch};
pub use in_memory::{InMemoryRepository, SearchStrategy};
