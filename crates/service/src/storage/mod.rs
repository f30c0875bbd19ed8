//! Storage abstractions for the service layer.

use async_trait::async_trait;
use models::Person;

use crate::errors::ServiceError;

pub mod line_file_store;
pub mod memory_store;

pub use line_file_store::LineFileStore;
pub use memory_store::MemoryPersonStore;

/// Keyed person storage. Names are unique; records are never updated or removed.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Insert a new person. Fails with `DuplicateKey` when the name is taken.
    async fn create(&self, person: Person) -> Result<Person, ServiceError>;

    /// Look a person up by name. Fails with `NotFound` when absent.
    async fn find(&self, name: &str) -> Result<Person, ServiceError>;
}
