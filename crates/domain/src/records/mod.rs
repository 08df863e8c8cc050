use std::fmt;

use serde::{
    de::{self, DeserializeOwned, Unexpected, Visitor},
    Deserializer, Serialize,
};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::{
    collection::Collection,
    errors::{Error, FieldError},
};

/// Medicine records
pub mod medicine;

/// Prescription records
pub mod prescription;

/// Staff records
pub mod staff;

/// Supplier records
pub mod supplier;

pub use medicine::{Medicine, Unit};
pub use prescription::{PaymentMethod, Prescription, PrescriptionItem, PrescriptionStatus};
pub use staff::{Role, Staff};
pub use supplier::Supplier;

/// A typed record persisted as one document in its own collection
pub trait Record: Serialize + DeserializeOwned + Validate + Send + Sync {
    const COLLECTION: Collection;
}

/// Check a record against its declared bounds, reporting every failed field.
pub fn validate<R: Validate>(record: &R) -> Result<(), Error> {
    record.validate().map_err(|errors| Error::Validation {
        fields: field_errors(&errors),
    })
}

/// Flatten nested validator output into `field` / `items[0].field` paths.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = Vec::new();
    collect(errors, "", &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    out.push(FieldError::new(
                        path.clone(),
                        failure.code.to_string(),
                        describe(failure),
                    ));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(failure: &ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }

    match (failure.params.get("min"), failure.params.get("max")) {
        (Some(min), Some(max)) => format!("must be between {min} and {max}"),
        (Some(min), None) => format!("must be greater than or equal to {min}"),
        (None, Some(max)) => format!("must be less than or equal to {max}"),
        (None, None) => failure.code.to_string(),
    }
}

fn default_true() -> bool {
    true
}

/// Integer fields take `3` or `3.0`; a fractional part is rejected.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
                Ok(value as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}
