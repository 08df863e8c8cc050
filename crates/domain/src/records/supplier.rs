use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Record;
use crate::collection::Collection;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Supplier {
    pub name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
}

impl Record for Supplier {
    const COLLECTION: Collection = Collection::Supplier;
}
