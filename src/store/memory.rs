use std::collections::HashMap;

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collection, Document, DocumentId, DocumentStore, ID_FIELD, StoredDocument, StoredId};

/// In-process document store for local development and tests
///
/// Follows MongoDB's insert rules: a generated ObjectId unless the body
/// carries its own `_id`, which is kept verbatim and must be unique.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<StoredId> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        let id = match document.remove(ID_FIELD) {
            Some(supplied) => StoredId::Supplied(supplied),
            None => StoredId::Generated(DocumentId::generate()),
        };

        if documents.iter().any(|existing| existing.id == id) {
            bail!(
                "duplicate key error in collection {}: _id {}",
                collection.name(),
                id.to_wire()
            );
        }

        documents.push(StoredDocument {
            id: id.clone(),
            fields: document,
        });
        Ok(id)
    }

    async fn delete_one(&self, collection: Collection, id: &DocumentId) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        let target = StoredId::Generated(*id);
        match documents.iter().position(|doc| doc.id == target) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
