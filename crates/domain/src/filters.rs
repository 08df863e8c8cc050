use serde::{de::Unexpected, Deserialize, Deserializer};
use serde_json::Value;

use crate::store::{Document, Limit};

/// Condition selecting a subset of documents during a read
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// No restriction
    All,
    /// Field equals value exactly
    Eq { field: &'static str, value: Value },
    /// Case-insensitive substring match; `needle` is stored lowercased
    ContainsIgnoreCase { field: &'static str, needle: String },
    /// Numeric `left <= right` between two fields of the same document
    FieldLe { left: &'static str, right: &'static str },
    AnyOf(Vec<Predicate>),
    AllOf(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: &'static str, needle: &str) -> Self {
        Self::ContainsIgnoreCase {
            field,
            needle: needle.to_lowercase(),
        }
    }

    /// Logical AND, collapsing `All`
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Self::All, other) => other,
            (this, Self::All) => this,
            (Self::AllOf(mut terms), other) => {
                terms.push(other);
                Self::AllOf(terms)
            }
            (this, other) => Self::AllOf(vec![this, other]),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => document.get(*field) == Some(value),
            Self::ContainsIgnoreCase { field, needle } => document
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(needle.as_str())),
            Self::FieldLe { left, right } => {
                match (
                    document.get(*left).and_then(Value::as_f64),
                    document.get(*right).and_then(Value::as_f64),
                ) {
                    (Some(left), Some(right)) => left <= right,
                    _ => false,
                }
            }
            Self::AnyOf(terms) => terms.iter().any(|term| term.matches(document)),
            Self::AllOf(terms) => terms.iter().all(|term| term.matches(document)),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Query flags take the usual form spellings in any case:
/// true/false, t/f, yes/no, y/n, on/off, 1/0.
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Ok(Some(true)),
        "false" | "f" | "no" | "n" | "off" | "0" => Ok(Some(false)),
        _ => Err(<D::Error as serde::de::Error>::invalid_value(
            Unexpected::Str(&raw),
            &"a boolean",
        )),
    }
}

/// `GET /api/medicines` parameters
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MedicineQuery {
    pub q: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub low_stock: Option<bool>,
    pub limit: Option<i64>,
}

impl MedicineQuery {
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::All;
        if let Some(q) = present(&self.q) {
            predicate = Predicate::AnyOf(vec![
                Predicate::contains("name", q),
                Predicate::contains("generic_name", q),
                Predicate::contains("sku", q),
            ]);
        }
        if self.low_stock.unwrap_or(false) {
            predicate = predicate.and(Predicate::FieldLe {
                left: "stock",
                right: "reorder_level",
            });
        }
        predicate
    }

    pub fn limit(&self) -> Limit {
        Limit::from_request(self.limit)
    }
}

/// `GET /api/prescriptions` parameters
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PrescriptionQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

impl PrescriptionQuery {
    pub fn predicate(&self) -> Predicate {
        match present(&self.status) {
            Some(status) => Predicate::equals("status", status),
            None => Predicate::All,
        }
    }

    pub fn limit(&self) -> Limit {
        Limit::from_request(self.limit)
    }
}

/// `GET /api/staff` parameters. `active` is tri-state: absent means unrestricted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StaffQuery {
    pub role: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub active: Option<bool>,
    pub limit: Option<i64>,
}

impl StaffQuery {
    pub fn predicate(&self) -> Predicate {
        let mut predicate = Predicate::All;
        if let Some(role) = present(&self.role) {
            predicate = Predicate::equals("role", role);
        }
        if let Some(active) = self.active {
            predicate = predicate.and(Predicate::equals("is_active", active));
        }
        predicate
    }

    pub fn limit(&self) -> Limit {
        Limit::from_request(self.limit)
    }
}

/// `GET /api/suppliers` parameters
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SupplierQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

impl SupplierQuery {
    pub fn predicate(&self) -> Predicate {
        match present(&self.q) {
            Some(q) => Predicate::AnyOf(vec![
                Predicate::contains("name", q),
                Predicate::contains("contact_name", q),
            ]),
            None => Predicate::All,
        }
    }

    pub fn limit(&self) -> Limit {
        Limit::from_request(self.limit)
    }
}
