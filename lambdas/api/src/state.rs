use std::sync::Arc;

use aws_config::BehaviorVersion;
use domain::{
    store::{DynamoStore, MemoryStore},
    DocumentStore,
};

use crate::{config::Config, error::ApiError};

pub const MEMORY_URL: &str = "memory://";
pub const DEFAULT_ENDPOINT_URL: &str = "dynamodb://";

#[derive(Clone)]
pub struct AppState {
    store: Option<Arc<dyn DocumentStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// The shared store, or an internal error when it was not configured.
    pub fn store(&self) -> Result<&dyn DocumentStore, ApiError> {
        self.store
            .as_deref()
            .ok_or_else(|| domain::Error::StoreUnavailable.into())
    }

    pub fn store_if_available(&self) -> Option<&dyn DocumentStore> {
        self.store.as_deref()
    }
}

/// Build the process-wide store handle. Missing settings leave it unavailable.
pub async fn connect(config: &Config) -> Option<Arc<dyn DocumentStore>> {
    let (Some(url), Some(name)) = (&config.database_url, &config.database_name) else {
        tracing::warn!("DATABASE_URL or DATABASE_NAME not set, database not available");
        return None;
    };

    if url == MEMORY_URL {
        tracing::info!("Using in-memory document store");
        return Some(Arc::new(MemoryStore::default()));
    }

    let loader = aws_config::defaults(BehaviorVersion::latest());
    let loader = if url == DEFAULT_ENDPOINT_URL {
        loader
    } else {
        loader.endpoint_url(url)
    };
    let sdk_config = loader.load().await;

    tracing::info!("Using DynamoDB tables prefixed {}-", name);
    Some(Arc::new(DynamoStore::new(
        aws_sdk_dynamodb::Client::new(&sdk_config),
        name.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_settings_leave_store_unavailable() {
        let config = Config {
            database_url: Some(MEMORY_URL.to_string()),
            database_name: None,
            port: 8000,
        };
        assert!(connect(&config).await.is_none());

        let state = AppState::new(None, config);
        assert!(state.store().is_err());
        assert!(state.store_if_available().is_none());
    }

    #[tokio::test]
    async fn memory_url_selects_in_process_store() {
        let config = Config {
            database_url: Some(MEMORY_URL.to_string()),
            database_name: Some("pharmacy".to_string()),
            port: 8000,
        };
        let store = connect(&config).await.unwrap();
        assert!(store.list_collections().await.unwrap().is_empty());
    }
}
