//! Item storage.
//!
//! # Design
//! Routes talk to storage only through the `TodoStore` trait, injected as
//! `Arc<dyn TodoStore>`, so a persistent backend can replace `MemoryStore`
//! without touching the HTTP layer.
//!
//! Writes take a `NewItem`, which has no `id` field. The stored id is always
//! the generated one (create) or the caller's key (update), so no input can
//! override it regardless of which layer calls the store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::ids::{IdGenerator, ShortIdGenerator};

/// A stored todo item as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

/// The client-writable fields of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewItem {
    pub description: String,
    pub is_completed: bool,
}

impl NewItem {
    fn into_item(self, id: String) -> TodoItem {
        TodoItem {
            id,
            description: self.description,
            is_completed: self.is_completed,
        }
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All items, in no particular order.
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<TodoItem>, StoreError>;

    /// Insert under a freshly generated id. Fails with
    /// `StoreError::DuplicateDescription` if the description is taken.
    async fn create(&self, item: NewItem) -> Result<TodoItem, StoreError>;

    /// Replace the item stored under `id` wholesale. `None` if absent.
    async fn update(&self, id: &str, item: NewItem) -> Result<Option<TodoItem>, StoreError>;

    /// Remove the item stored under `id`, returning whether it existed.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;
}

/// Process-local store. Contents are lost on restart.
pub struct MemoryStore<G = ShortIdGenerator> {
    items: RwLock<HashMap<String, TodoItem>>,
    ids: G,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_id_generator(ShortIdGenerator::default())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> MemoryStore<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            ids,
        }
    }
}

#[async_trait]
impl<G: IdGenerator> TodoStore for MemoryStore<G> {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<TodoItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn create(&self, item: NewItem) -> Result<TodoItem, StoreError> {
        let mut items = self.items.write().await;
        // Linear scan; the dataset is a hand-maintained todo list.
        if items.values().any(|existing| existing.description == item.description) {
            return Err(StoreError::DuplicateDescription);
        }

        let mut id = self.ids.generate();
        while items.contains_key(&id) {
            id = self.ids.generate();
        }

        let created = item.into_item(id.clone());
        items.insert(id, created.clone());
        debug!(id = %created.id, "created item");
        Ok(created)
    }

    async fn update(&self, id: &str, item: NewItem) -> Result<Option<TodoItem>, StoreError> {
        let mut items = self.items.write().await;
        let Some(slot) = items.get_mut(id) else {
            return Ok(None);
        };
        *slot = item.into_item(id.to_string());
        debug!(id, "replaced item");
        Ok(Some(slot.clone()))
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.items.write().await.remove(id).is_some();
        debug!(id, removed, "removed item");
        Ok(removed)
    }
}
