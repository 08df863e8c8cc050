use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Document, DocumentStore, Limit};
use crate::{collection::Collection, errors::StoreError, filters::Predicate};

/// Keeps documents in insertion order for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        predicate: &Predicate,
        limit: Limit,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read();
        let Some(documents) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let matching = documents.iter().filter(|d| predicate.matches(d)).cloned();
        Ok(match limit.get() {
            Some(max) => matching.take(max).collect(),
            None => matching.collect(),
        })
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read();
        Ok(Collection::ALL
            .iter()
            .filter(|c| collections.get(*c).is_some_and(|docs| !docs.is_empty()))
            .map(|c| c.name().to_string())
            .collect())
    }
}
