use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{default_true, Record};
use crate::collection::Collection;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, ToSchema)]
pub enum Role {
    Admin,
    Pharmacist,
    Sales,
    Accountant,
}

impl Default for Role {
    fn default() -> Self {
        Self::Sales
    }
}

/// Staff member. Email is neither unique nor format checked.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Staff {
    pub name: String,
    pub email: String,
    #[serde(default)]
    #[schema(inline, default = "Sales")]
    pub role: Role,
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    #[schema(default = true)]
    pub is_active: bool,
}

impl Record for Staff {
    const COLLECTION: Collection = Collection::Staff;
}
