use derive_new::new;
use serde::Serialize;
use thiserror::Error;

/// One failed constraint on one request field
#[derive(Clone, Debug, Serialize, Eq, PartialEq, new)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {} field(s) rejected", .fields.len())]
    Validation { fields: Vec<FieldError> },

    #[error("Invalid id format")]
    InvalidId,

    #[error("Document store not available")]
    StoreUnavailable,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Backend(String),

    #[error("Document encoding failed: {0}")]
    Encoding(String),
}
