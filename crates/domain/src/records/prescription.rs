use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{whole_number, Record};
use crate::collection::Collection;

/// Prescription lifecycle status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Pending,
    Dispensed,
    Cancelled,
}

impl Default for PrescriptionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Insurance,
}

/// One dispensed line. `medicine_id` is not checked against stored medicines.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct PrescriptionItem {
    /// Reference to medicine _id
    pub medicine_id: String,
    /// Snapshot of medicine name
    pub name: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 1))]
    #[schema(minimum = 1)]
    pub quantity: i64,
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0)]
    pub unit_price: f64,
}

/// Prescription / receipt.
///
/// `subtotal`, `tax` and `total` are stored as supplied; they are never
/// recomputed from `items`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Prescription {
    /// Prescription number / receipt
    pub number: Option<String>,
    pub patient_name: String,
    pub patient_phone: Option<String>,
    pub doctor_name: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    #[schema(inline)]
    pub items: Vec<PrescriptionItem>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0, default = 0.0)]
    pub subtotal: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0, default = 0.0)]
    pub tax: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0, default = 0.0)]
    pub total: f64,
    #[serde(default)]
    #[schema(inline, default = "pending")]
    pub status: PrescriptionStatus,
    #[schema(inline)]
    pub payment_method: Option<PaymentMethod>,
}

impl Record for Prescription {
    const COLLECTION: Collection = Collection::Prescription;
}
