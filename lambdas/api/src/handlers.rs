use axum::{extract::State, Json};
use domain::{
    create_document,
    filters::{MedicineQuery, Predicate, PrescriptionQuery, StaffQuery, SupplierQuery},
    get_documents,
    records::{Medicine, Prescription, Staff, Supplier},
    schema::schema_registry,
    Collection, Document, Limit, Record,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::{
    error::ApiError,
    extract::{ListQuery, ValidJson},
    state::AppState,
};

const COLLECTIONS_SHOWN: usize = 10;
const ERROR_TEXT_LEN: usize = 80;

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

async fn create<R: Record>(state: &AppState, record: &R) -> Result<Json<Created>, ApiError> {
    let id = create_document(state.store()?, record).await?;
    Ok(Json(Created { id }))
}

async fn list(
    state: &AppState,
    collection: Collection,
    predicate: &Predicate,
    limit: Limit,
) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = get_documents(state.store()?, collection, predicate, limit).await?;
    Ok(Json(documents))
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Pharmacy Backend Running" }))
}

pub async fn schema() -> Json<Map<String, Value>> {
    Json(schema_registry())
}

fn set_marker(present: bool) -> String {
    let marker = if present { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// Never fails: store problems are reported in the body.
pub async fn diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let mut report = Diagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_marker(state.config.database_url.is_some()),
        database_name: set_marker(state.config.database_name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = state.store_if_available() {
        report.database = "✅ Available".to_string();
        report.connection_status = "Connected".to_string();

        match store.list_collections().await {
            Ok(names) => {
                report.collections = names.into_iter().take(COLLECTIONS_SHOWN).collect();
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                tracing::warn!("Database check failed: {}", e);
                report.database = format!(
                    "⚠️ Connected but Error: {}",
                    truncate(&e.to_string(), ERROR_TEXT_LEN)
                );
            }
        }
    }

    Json(report)
}

// Medicines

pub async fn create_medicine(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Medicine>,
) -> Result<Json<Created>, ApiError> {
    create(&state, &payload).await
}

pub async fn list_medicines(
    State(state): State<AppState>,
    ListQuery(query): ListQuery<MedicineQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, Collection::Medicine, &query.predicate(), query.limit()).await
}

// Prescriptions

pub async fn create_prescription(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Prescription>,
) -> Result<Json<Created>, ApiError> {
    create(&state, &payload).await
}

pub async fn list_prescriptions(
    State(state): State<AppState>,
    ListQuery(query): ListQuery<PrescriptionQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, Collection::Prescription, &query.predicate(), query.limit()).await
}

// Staff

pub async fn create_staff(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Staff>,
) -> Result<Json<Created>, ApiError> {
    create(&state, &payload).await
}

pub async fn list_staff(
    State(state): State<AppState>,
    ListQuery(query): ListQuery<StaffQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, Collection::Staff, &query.predicate(), query.limit()).await
}

// Suppliers

pub async fn create_supplier(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<Supplier>,
) -> Result<Json<Created>, ApiError> {
    create(&state, &payload).await
}

pub async fn list_suppliers(
    State(state): State<AppState>,
    ListQuery(query): ListQuery<SupplierQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    list(&state, Collection::Supplier, &query.predicate(), query.limit()).await
}
