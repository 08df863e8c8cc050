use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use derive_new::new;

use super::{Document, DocumentStore, Limit};
use crate::{collection::Collection, errors::StoreError, filters::Predicate};

type Item = HashMap<String, AttributeValue>;

/// One table per collection, named `{namespace}-{collection}`, keyed by the
/// string attribute `_id`.
#[derive(Clone, Debug, new)]
pub struct DynamoStore {
    client: Client,
    namespace: String,
}

impl DynamoStore {
    fn table_name(&self, collection: Collection) -> String {
        format!("{}-{}", self.namespace, collection.name())
    }

    fn table_prefix(&self) -> String {
        format!("{}-", self.namespace)
    }
}

fn backend(err: impl std::error::Error + 'static) -> StoreError {
    StoreError::Backend(DisplayErrorContext(&err).to_string())
}

fn encoding(err: serde_dynamo::Error) -> StoreError {
    StoreError::Encoding(err.to_string())
}

#[async_trait]
impl DocumentStore for DynamoStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let item: Item = serde_dynamo::to_item(document).map_err(encoding)?;

        self.client
            .put_item()
            .table_name(self.table_name(collection))
            .set_item(Some(item))
            .send()
            .await
            .map_err(backend)?;

        Ok(())
    }

    // Scan's own Limit counts items before filtering, so pages are walked
    // until enough documents match.
    async fn find(
        &self,
        collection: Collection,
        predicate: &Predicate,
        limit: Limit,
    ) -> Result<Vec<Document>, StoreError> {
        let table = self.table_name(collection);
        let mut documents = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(&table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(backend)?;

            for item in page.items() {
                let document: Document = serde_dynamo::from_item(item.clone()).map_err(encoding)?;
                if predicate.matches(&document) {
                    documents.push(document);
                    if limit.is_reached(documents.len()) {
                        return Ok(documents);
                    }
                }
            }

            match page.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        tracing::debug!("Scanned {} with {} matches", table, documents.len());
        Ok(documents)
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let prefix = self.table_prefix();
        let mut names = Vec::new();
        let mut start_table: Option<String> = None;

        loop {
            let page = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start_table.take())
                .send()
                .await
                .map_err(backend)?;

            names.extend(
                page.table_names()
                    .iter()
                    .filter_map(|table| table.strip_prefix(prefix.as_str()))
                    .map(str::to_string),
            );

            match page.last_evaluated_table_name() {
                Some(table) => start_table = Some(table.to_string()),
                None => break,
            }
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_types::body::SdkBody;
    use serde_json::json;

    use super::*;
    use crate::records::Medicine;

    const SCAN_PAGE_ONE: &str = r#"{
        "Items": [
            {"_id": {"S": "01"}, "name": {"S": "Paracetamol"}, "stock": {"N": "2"}, "reorder_level": {"N": "10"}},
            {"_id": {"S": "02"}, "name": {"S": "Ibuprofen"}, "stock": {"N": "50"}, "reorder_level": {"N": "10"}}
        ],
        "Count": 2,
        "ScannedCount": 2,
        "LastEvaluatedKey": {"_id": {"S": "02"}}
    }"#;

    const SCAN_PAGE_TWO: &str = r#"{
        "Items": [
            {"_id": {"S": "03"}, "name": {"S": "Cetirizine"}, "stock": {"N": "10"}, "reorder_level": {"N": "10"}}
        ],
        "Count": 1,
        "ScannedCount": 1
    }"#;

    fn store() -> DynamoStore {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        DynamoStore::new(Client::from_conf(config), "pharmacy".to_string())
    }

    fn event(status: u16, body: &str) -> ReplayEvent {
        ReplayEvent::new(
            http::Request::builder()
                .uri("https://dynamodb.us-east-1.amazonaws.com/")
                .body(SdkBody::empty())
                .unwrap(),
            http::Response::builder()
                .status(status)
                .header("content-type", "application/x-amz-json-1.0")
                .body(SdkBody::from(body.to_string()))
                .unwrap(),
        )
    }

    fn replay_store(events: Vec<ReplayEvent>) -> (DynamoStore, StaticReplayClient) {
        let http_client = StaticReplayClient::new(events);
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
            .http_client(http_client.clone())
            .build();
        let store = DynamoStore::new(Client::from_conf(config), "pharmacy".to_string());
        (store, http_client)
    }

    fn scan_pages() -> (DynamoStore, StaticReplayClient) {
        replay_store(vec![event(200, SCAN_PAGE_ONE), event(200, SCAN_PAGE_TWO)])
    }

    fn ids(documents: &[Document]) -> Vec<&str> {
        documents
            .iter()
            .filter_map(|d| d.get("_id").and_then(serde_json::Value::as_str))
            .collect()
    }

    #[test]
    fn tables_are_namespaced_per_collection() {
        let store = store();
        assert_eq!(store.table_name(Collection::Medicine), "pharmacy-medicine");
        assert_eq!(store.table_name(Collection::Staff), "pharmacy-staff");
        assert_eq!(store.table_prefix(), "pharmacy-");
    }

    #[test]
    fn documents_convert_to_items_and_back() {
        let document: Document = serde_json::from_value(json!({
            "_id": "01HZX3V6Q7M0A1B2C3D4E5F6G7",
            "name": "Paracetamol",
            "stock": 12,
            "taxable": true,
            "notes": null,
        }))
        .unwrap();

        let item: Item = serde_dynamo::to_item(document.clone()).unwrap();
        assert_eq!(
            item.get("_id"),
            Some(&AttributeValue::S("01HZX3V6Q7M0A1B2C3D4E5F6G7".to_string()))
        );
        assert_eq!(item.get("stock"), Some(&AttributeValue::N("12".to_string())));

        let restored: Document = serde_dynamo::from_item(item).unwrap();
        assert_eq!(restored, document);
    }

    // DynamoDB numbers carry no int/float distinction: a whole float is read
    // back as an integer, which typed records still accept.
    #[test]
    fn whole_floats_come_back_as_integers() {
        let document: Document = serde_json::from_value(json!({
            "name": "Paracetamol",
            "price": 2.0,
            "tax_rate": 5.5,
        }))
        .unwrap();

        let item: Item = serde_dynamo::to_item(document).unwrap();
        assert_eq!(item.get("price"), Some(&AttributeValue::N("2".to_string())));

        let restored: Document = serde_dynamo::from_item(item).unwrap();
        assert_eq!(restored["price"], json!(2));
        assert_eq!(restored["tax_rate"], json!(5.5));

        let medicine: Medicine = serde_json::from_value(serde_json::Value::Object(restored)).unwrap();
        assert_eq!(medicine.price, 2.0);
    }

    #[tokio::test]
    async fn find_walks_every_scan_page() {
        let (store, http_client) = scan_pages();

        let documents = store
            .find(Collection::Medicine, &Predicate::All, Limit::unbounded())
            .await
            .unwrap();

        assert_eq!(ids(&documents), vec!["01", "02", "03"]);
        assert_eq!(http_client.actual_requests().count(), 2);
    }

    #[tokio::test]
    async fn find_stops_once_limit_is_met() {
        let (store, http_client) = scan_pages();

        let documents = store
            .find(Collection::Medicine, &Predicate::All, Limit::from_request(Some(1)))
            .await
            .unwrap();

        assert_eq!(ids(&documents), vec!["01"]);
        assert_eq!(http_client.actual_requests().count(), 1);
    }

    #[tokio::test]
    async fn find_filters_across_pages() {
        let (store, http_client) = scan_pages();
        let low_stock = Predicate::FieldLe {
            left: "stock",
            right: "reorder_level",
        };

        let documents = store
            .find(Collection::Medicine, &low_stock, Limit::from_request(Some(2)))
            .await
            .unwrap();

        assert_eq!(ids(&documents), vec!["01", "03"]);
        assert_eq!(http_client.actual_requests().count(), 2);
    }

    #[tokio::test]
    async fn list_collections_strips_namespace_and_pages() {
        let (store, http_client) = replay_store(vec![
            event(
                200,
                r#"{"TableNames": ["other-app", "pharmacy-medicine"], "LastEvaluatedTableName": "pharmacy-medicine"}"#,
            ),
            event(200, r#"{"TableNames": ["pharmacy-staff"]}"#),
        ]);

        let names = store.list_collections().await.unwrap();

        assert_eq!(names, vec!["medicine".to_string(), "staff".to_string()]);
        assert_eq!(http_client.actual_requests().count(), 2);
    }

    #[tokio::test]
    async fn service_errors_become_backend_errors() {
        let (store, _) = replay_store(vec![event(
            400,
            r#"{"__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException", "message": "Requested resource not found"}"#,
        )]);

        let err = store
            .find(Collection::Supplier, &Predicate::All, Limit::from_request(None))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Backend(_)));
        assert!(err.to_string().contains("ResourceNotFound"));
    }
}
