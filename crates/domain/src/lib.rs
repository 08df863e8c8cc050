//! Pharmacy Domain Models

/// Collection names
pub mod collection;

/// Domain errors
pub mod errors;

/// Store identifiers
pub mod id;

/// List filters and predicates
pub mod filters;

/// Record shapes and validation
pub mod records;

/// Schema discovery
pub mod schema;

/// Document persistence
pub mod store;

pub use collection::Collection;
pub use errors::{Error, FieldError, StoreError};
pub use records::{validate, Record};
pub use store::{create_document, get_documents, Document, DocumentStore, Limit};
