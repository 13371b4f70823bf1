//! In-memory item store run as an actor.
//!
//! [`StoreService`] owns the map and processes one message at a time.
//! [`StoreClient`] is the cloneable handle that implements [`ItemStore`].
//! Individual gets and puts are serialized by the actor, but an update's
//! read-modify-write spans two messages, so concurrent updates still resolve
//! last-writer-wins exactly like the remote table.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::domain::Product;
use crate::error::StoreError;
use crate::store::ItemStore;

pub type StoreResponse<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Get {
        id: String,
        respond_to: StoreResponse<Option<Product>>,
    },
    Put {
        product: Product,
        respond_to: StoreResponse<()>,
    },
    Scan {
        respond_to: StoreResponse<Vec<Product>>,
    },
    Shutdown,
    #[cfg(test)]
    Count {
        respond_to: StoreResponse<usize>,
    },
}

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! store_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, StoreError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| StoreError::Unavailable("store closed".to_string()))?;

                response.await.map_err(|_| StoreError::Unavailable("store dropped request".to_string()))?
            }
        }
    };
}

pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    products: HashMap<String, Product>,
}

impl StoreService {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: HashMap::new(),
        };
        (service, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { id, respond_to } => self.handle_get(id, respond_to),
                StoreRequest::Put {
                    product,
                    respond_to,
                } => self.handle_put(product, respond_to),
                StoreRequest::Scan { respond_to } => self.handle_scan(respond_to),
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
                #[cfg(test)]
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.products.len()));
                }
            }
        }

        info!(product_count = self.products.len(), "StoreService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get(&self, id: String, respond_to: StoreResponse<Option<Product>>) {
        let product = self.products.get(&id).cloned();
        match &product {
            Some(product) => debug!(product_name = %product.name, "Product found"),
            None => debug!("Product not found"),
        }
        let _ = respond_to.send(Ok(product));
    }

    #[instrument(fields(product_id = %product.id), skip(self, product, respond_to))]
    fn handle_put(&mut self, product: Product, respond_to: StoreResponse<()>) {
        let replaced = self.products.insert(product.id.clone(), product).is_some();
        debug!(replaced, "Product stored");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_scan(&self, respond_to: StoreResponse<Vec<Product>>) {
        let products: Vec<Product> = self.products.values().cloned().collect();
        debug!(product_count = products.len(), "Scanned products");
        let _ = respond_to.send(Ok(products));
    }
}

#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::Unavailable("store closed".to_string()))
    }
}

store_method!(StoreClient => fn get(id: String) -> Option<Product> as StoreRequest::Get);
store_method!(StoreClient => fn insert(product: Product) -> () as StoreRequest::Put);
store_method!(StoreClient => fn scan() -> Vec<Product> as StoreRequest::Scan);

#[cfg(test)]
store_method!(StoreClient => fn count() -> usize as StoreRequest::Count);

#[async_trait]
impl ItemStore for StoreClient {
    async fn put(&self, product: Product) -> Result<(), StoreError> {
        self.insert(product).await
    }

    async fn get_by_id(&self, id: String) -> Result<Option<Product>, StoreError> {
        self.get(id).await
    }

    async fn scan_all(&self) -> Result<Vec<Product>, StoreError> {
        self.scan().await
    }
}
