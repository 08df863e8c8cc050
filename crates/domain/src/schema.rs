use serde_json::{Map, Value};
use utoipa::PartialSchema;

use crate::{
    collection::Collection,
    records::{Medicine, Prescription, Staff, Supplier},
};

/// JSON schema of every record, keyed by collection name.
pub fn schema_registry() -> Map<String, Value> {
    Collection::ALL
        .iter()
        .map(|collection| (collection.name().to_string(), schema_for(*collection)))
        .collect()
}

pub fn schema_for(collection: Collection) -> Value {
    match collection {
        Collection::Medicine => describe::<Medicine>("Medicine"),
        Collection::Prescription => describe::<Prescription>("Prescription"),
        Collection::Staff => describe::<Staff>("Staff"),
        Collection::Supplier => describe::<Supplier>("Supplier"),
    }
}

fn describe<S: PartialSchema>(title: &str) -> Value {
    let mut schema = serde_json::to_value(S::schema()).unwrap_or(Value::Null);
    if let Value::Object(fields) = &mut schema {
        fields
            .entry("title")
            .or_insert_with(|| Value::String(title.to_string()));
    }
    schema
}
