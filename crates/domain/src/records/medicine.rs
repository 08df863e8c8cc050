use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{default_true, whole_number, Record};
use crate::collection::Collection;

/// Unit of measure
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Tablet,
    Capsule,
    Bottle,
    Syrup,
    Ml,
    Mg,
    G,
    Pack,
    Unit,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Unit
    }
}

/// Stocked medicine
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate, ToSchema)]
pub struct Medicine {
    /// Medicine name
    pub name: String,
    /// Generic/chemical name
    pub generic_name: Option<String>,
    /// Therapeutic category
    pub category: Option<String>,
    /// Manufacturer name
    pub manufacturer: Option<String>,
    /// Internal SKU / barcode
    pub sku: Option<String>,
    /// Batch/Lot number
    pub batch_number: Option<String>,
    /// Expiry date (YYYY-MM-DD)
    pub expiry_date: Option<NaiveDate>,
    /// Selling price
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0)]
    pub price: f64,
    /// Cost price
    #[validate(range(min = 0.0))]
    #[schema(minimum = 0.0)]
    pub cost_price: Option<f64>,
    /// Units in stock
    #[serde(default, deserialize_with = "whole_number")]
    #[validate(range(min = 0))]
    #[schema(minimum = 0, default = 0)]
    pub stock: i64,
    /// Reorder threshold
    #[serde(default = "default_reorder_level", deserialize_with = "whole_number")]
    #[validate(range(min = 0))]
    #[schema(minimum = 0, default = 10)]
    pub reorder_level: i64,
    /// Unit of measure
    #[serde(default)]
    #[schema(inline, default = "unit")]
    pub unit: Unit,
    /// Whether item is taxable
    #[serde(default = "default_true")]
    #[schema(default = true)]
    pub taxable: bool,
    /// Tax rate percentage
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    #[schema(minimum = 0.0, maximum = 100.0, default = 0.0)]
    pub tax_rate: f64,
    /// Additional notes
    pub notes: Option<String>,
}

fn default_reorder_level() -> i64 {
    10
}

impl Record for Medicine {
    const COLLECTION: Collection = Collection::Medicine;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{errors::Error, records::validate};

    #[test]
    fn defaults_fill_missing_fields() {
        let medicine: Medicine =
            serde_json::from_value(json!({ "name": "Paracetamol", "price": 2.5 })).unwrap();

        assert_eq!(medicine.stock, 0);
        assert_eq!(medicine.reorder_level, 10);
        assert_eq!(medicine.unit, Unit::Unit);
        assert!(medicine.taxable);
        assert_eq!(medicine.tax_rate, 0.0);
        assert!(medicine.generic_name.is_none());
        assert!(validate(&medicine).is_ok());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let result = serde_json::from_value::<Medicine>(
            json!({ "name": "Paracetamol", "price": 2.5, "unit": "box" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn price_is_required() {
        let result = serde_json::from_value::<Medicine>(json!({ "name": "Paracetamol" }));
        assert!(result.is_err());
    }

    #[test]
    fn integral_floats_are_accepted_for_counts() {
        let medicine: Medicine = serde_json::from_value(json!({
            "name": "Paracetamol",
            "price": 2.5,
            "stock": 12.0,
            "reorder_level": 4,
        }))
        .unwrap();
        assert_eq!(medicine.stock, 12);
        assert_eq!(medicine.reorder_level, 4);

        let fractional = serde_json::from_value::<Medicine>(
            json!({ "name": "Paracetamol", "price": 2.5, "stock": 1.5 }),
        );
        assert!(fractional.is_err());

        let text = serde_json::from_value::<Medicine>(
            json!({ "name": "Paracetamol", "price": 2.5, "reorder_level": "4" }),
        );
        assert!(text.is_err());
    }

    #[test]
    fn expiry_date_uses_calendar_format() {
        let medicine: Medicine = serde_json::from_value(json!({
            "name": "Amoxicillin",
            "price": 4.0,
            "expiry_date": "2027-01-31",
        }))
        .unwrap();

        assert_eq!(
            medicine.expiry_date,
            NaiveDate::from_ymd_opt(2027, 1, 31)
        );
        assert_eq!(serde_json::to_value(&medicine).unwrap()["expiry_date"], "2027-01-31");
    }

    #[test]
    fn every_out_of_range_field_is_reported() {
        let medicine: Medicine = serde_json::from_value(json!({
            "name": "Ibuprofen",
            "price": -1.0,
            "cost_price": -0.5,
            "stock": -3,
            "reorder_level": -1,
            "tax_rate": 100.5,
        }))
        .unwrap();

        let Err(Error::Validation { fields }) = validate(&medicine) else {
            panic!("expected validation error");
        };

        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            names,
            vec!["cost_price", "price", "reorder_level", "stock", "tax_rate"]
        );
        assert!(fields.iter().all(|f| f.code == "range"));
    }

    #[test]
    fn tax_rate_bounds_are_inclusive() {
        for rate in [0.0, 100.0] {
            let medicine: Medicine = serde_json::from_value(json!({
                "name": "Cetirizine",
                "price": 1.0,
                "tax_rate": rate,
            }))
            .unwrap();
            assert!(validate(&medicine).is_ok(), "tax_rate {rate} should be accepted");
        }
    }
}
