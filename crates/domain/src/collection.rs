use serde::{Deserialize, Serialize};

/// Named bucket of documents in the store
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Medicine,
    Prescription,
    Staff,
    Supplier,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Medicine,
        Collection::Prescription,
        Collection::Staff,
        Collection::Supplier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Medicine => "medicine",
            Collection::Prescription => "prescription",
            Collection::Staff => "staff",
            Collection::Supplier => "supplier",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
