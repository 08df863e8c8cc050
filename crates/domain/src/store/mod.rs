use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::{
    collection::Collection,
    errors::{Error, StoreError},
    filters::Predicate,
    id,
    records::{validate, Record},
};

/// DynamoDB backed store
pub mod dynamo;

/// In-process store
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// One stored record as a flat key-value mapping
pub type Document = Map<String, Value>;

/// Field holding the generated identifier
pub const ID_FIELD: &str = "_id";

/// Maximum number of documents a list query returns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limit(Option<usize>);

impl Limit {
    pub const DEFAULT: i64 = 100;

    /// `None` falls back to the default, `0` lifts the limit and a negative
    /// value counts by its magnitude.
    pub fn from_request(value: Option<i64>) -> Self {
        match value.unwrap_or(Self::DEFAULT) {
            0 => Self(None),
            n => Self(Some(usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX))),
        }
    }

    pub fn unbounded() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<usize> {
        self.0
    }

    pub fn is_reached(&self, count: usize) -> bool {
        self.0.is_some_and(|max| count >= max)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::from_request(None)
    }
}

/// Persistence over named collections, shared by every record type
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document that already carries its `_id`.
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    /// At most `limit` documents matching `predicate`, in the store's natural order.
    async fn find(
        &self,
        collection: Collection,
        predicate: &Predicate,
        limit: Limit,
    ) -> Result<Vec<Document>, StoreError>;

    /// Collection names currently known to the store.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Validate and store a record, returning its new identifier.
pub async fn create_document<R: Record>(
    store: &dyn DocumentStore,
    record: &R,
) -> Result<String, Error> {
    validate(record)?;

    let mut document = to_document(record)?;
    let id = id::new_id();
    let now = Value::String(Utc::now().to_rfc3339());

    document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    document.insert("created_at".to_string(), now.clone());
    document.insert("updated_at".to_string(), now);

    store.insert(R::COLLECTION, document).await?;
    tracing::info!("Created {} {}", R::COLLECTION, id);

    Ok(id)
}

/// Filtered read with identifiers normalized to plain strings.
pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: Collection,
    predicate: &Predicate,
    limit: Limit,
) -> Result<Vec<Document>, Error> {
    let mut documents = store.find(collection, predicate, limit).await?;
    for document in &mut documents {
        if let Some(id) = document.get_mut(ID_FIELD) {
            if !id.is_string() {
                *id = Value::String(id.to_string());
            }
        }
    }
    Ok(documents)
}

fn to_document<R: Record>(record: &R) -> Result<Document, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(StoreError::Encoding(format!(
            "{} record is not a JSON object",
            R::COLLECTION
        ))),
        Err(e) => Err(StoreError::Encoding(e.to_string())),
    }
}
