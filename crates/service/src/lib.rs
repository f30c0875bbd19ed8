//! Service layer: the `PersonStore` abstraction and its implementations.
//! - `storage::line_file_store` persists records as lines in a text file.
//! - `storage::memory_store` keeps records in memory for tests and demos.
//! - `runtime` builds the configured store at startup.

pub mod errors;
pub mod runtime;
pub mod storage;

pub use errors::{ErrorKind, ServiceError};
pub use storage::PersonStore;
