use std::collections::{hash_map::Entry, HashMap};

use async_trait::async_trait;
use models::Person;
use tokio::sync::RwLock;

use super::PersonStore;
use crate::errors::ServiceError;

/// In-memory store keyed by name. Nothing survives the process.
#[derive(Default)]
pub struct MemoryPersonStore {
    inner: RwLock<HashMap<String, Person>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn create(&self, person: Person) -> Result<Person, ServiceError> {
        let mut map = self.inner.write().await;
        match map.entry(person.name.clone()) {
            Entry::Occupied(_) => Err(ServiceError::DuplicateKey(person.name)),
            Entry::Vacant(slot) => {
                slot.insert(person.clone());
                Ok(person)
            }
        }
    }

    async fn find(&self, name: &str) -> Result<Person, ServiceError> {
        let map = self.inner.read().await;
        map.get(name).cloned().ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }
}
