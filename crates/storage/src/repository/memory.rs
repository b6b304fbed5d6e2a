use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EntityStore;
use crate::error::{Result, StorageError};
use crate::models::Entity;

/// Process-local store backed by an ordered `Vec`.
pub struct MemoryStore<E> {
    items: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<E>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn list(&self) -> Result<Vec<E>> {
        Ok(self.items.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<E> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound(E::NAME))
    }

    async fn insert(&self, entity: E) -> Result<E> {
        self.items.write().await.push(entity.clone());
        Ok(entity)
    }

    async fn replace(&self, entity: E) -> Result<E> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.id() == entity.id())
            .ok_or(StorageError::NotFound(E::NAME))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn remove(&self, id: Uuid) -> Result<E> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(StorageError::NotFound(E::NAME))?;
        Ok(items.remove(index))
    }
}
