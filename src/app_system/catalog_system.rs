use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::Product;
use crate::error::{ConfigError, StoreError};
use crate::handlers::CatalogHandler;
use crate::store::{DynamoStore, ItemStore, StoreClient, StoreService};

/// The store collaborator chosen at startup.
#[derive(Clone)]
pub enum CatalogStore {
    Memory(StoreClient),
    Dynamo(DynamoStore),
}

#[async_trait]
impl ItemStore for CatalogStore {
    async fn put(&self, product: Product) -> Result<(), StoreError> {
        match self {
            CatalogStore::Memory(store) => store.put(product).await,
            CatalogStore::Dynamo(store) => store.put(product).await,
        }
    }

    async fn get_by_id(&self, id: String) -> Result<Option<Product>, StoreError> {
        match self {
            CatalogStore::Memory(store) => store.get_by_id(id).await,
            CatalogStore::Dynamo(store) => store.get_by_id(id).await,
        }
    }

    async fn scan_all(&self) -> Result<Vec<Product>, StoreError> {
        match self {
            CatalogStore::Memory(store) => store.scan_all().await,
            CatalogStore::Dynamo(store) => store.scan_all().await,
        }
    }
}

/// Owns the store collaborator for the life of the process.
///
/// **Startup:** the store is built exactly once, here, and the handler that
/// wraps it is shared by every invocation.
/// **Shutdown:** the in-memory store actor is told to stop and awaited; the
/// SDK client needs no teardown beyond being dropped.
pub struct CatalogSystem {
    pub handler: Arc<CatalogHandler<CatalogStore>>,
    memory_client: Option<StoreClient>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    #[instrument(name = "catalog_system", skip(config), fields(backend = ?config.backend))]
    pub async fn start(config: &StoreConfig) -> Result<Self, ConfigError> {
        info!("Starting catalog system");

        let system = match config.backend {
            StoreBackend::Memory => Self::in_memory(),
            StoreBackend::Dynamodb => {
                let store = DynamoStore::connect(config).await;
                info!(table = store.table(), "Connected to table");
                Self {
                    handler: Arc::new(CatalogHandler::new(CatalogStore::Dynamo(store))),
                    memory_client: None,
                    handles: Vec::new(),
                }
            }
        };

        info!("Catalog system started successfully");
        Ok(system)
    }

    /// Spawns the in-memory store actor. Needs a running tokio runtime.
    pub fn in_memory() -> Self {
        let (store_service, store_client) = StoreService::new(100);
        let handle = tokio::spawn(store_service.run());

        Self {
            handler: Arc::new(CatalogHandler::new(CatalogStore::Memory(
                store_client.clone(),
            ))),
            memory_client: Some(store_client),
            handles: vec![handle],
        }
    }

    /// **Error Handling:** Log errors but continue shutdown to prevent hangs
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        info!("Shutting down catalog system");

        if let Some(client) = &self.memory_client {
            if let Err(e) = client.shutdown().await {
                error!(error = %e, "Store shutdown request failed");
            }
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Catalog system shutdown complete");
    }
}
