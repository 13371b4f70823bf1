//! The four catalog operations.
//!
//! One [`CatalogHandler`] serves all of them; [`Operation`] picks which. Every
//! request runs the same linear path: validate, call the store, shape the
//! response. Any failure short-circuits to an error response, so nothing ever
//! escapes to the dispatch runtime.

mod response;

use std::fmt;

use clap::ValueEnum;
use tracing::{debug, error, info, instrument};

use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::error::CatalogError;
use crate::id::{uuid_generator, IdGenerator};
use crate::store::ItemStore;
use crate::validation::{validate, ValidatedRequest};

pub use response::ApiResponse;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    Create,
    Read,
    List,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::List => "list",
            Operation::Update => "update",
        };
        f.write_str(name)
    }
}

pub struct CatalogHandler<S> {
    store: S,
    next_id: IdGenerator,
}

impl<S: ItemStore> CatalogHandler<S> {
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, uuid_generator())
    }

    pub fn with_id_generator(store: S, next_id: IdGenerator) -> Self {
        Self { store, next_id }
    }

    /// Runs one raw request through the selected operation.
    #[instrument(name = "catalog_request", skip(self, operation, payload), fields(operation = %operation))]
    pub async fn handle(&self, operation: Operation, payload: &str) -> ApiResponse {
        debug!(payload, "Received payload");

        let request = match validate(operation, payload) {
            Ok(request) => request,
            Err(e) => {
                let err = CatalogError::from(e);
                let response = ApiResponse::error(&err);
                error!(error = %err, status_code = response.status_code, "Validation failed");
                return response;
            }
        };

        let response = match request {
            ValidatedRequest::Create(payload) => {
                self.create(payload).await.map(|p| ApiResponse::ok(&p))
            }
            ValidatedRequest::Read { id } => self.read(id).await.map(|p| ApiResponse::ok(&p)),
            ValidatedRequest::List => self.list().await.map(|ps| ApiResponse::ok(&ps)),
            ValidatedRequest::Update { id, patch } => {
                self.update(id, patch).await.map(|p| ApiResponse::ok(&p))
            }
        };

        response.unwrap_or_else(|err| ApiResponse::error(&err))
    }

    #[allow(dead_code)]
    pub async fn handle_create(&self, payload: &str) -> ApiResponse {
        self.handle(Operation::Create, payload).await
    }

    #[allow(dead_code)]
    pub async fn handle_read(&self, payload: &str) -> ApiResponse {
        self.handle(Operation::Read, payload).await
    }

    #[allow(dead_code)]
    pub async fn handle_list(&self, payload: &str) -> ApiResponse {
        self.handle(Operation::List, payload).await
    }

    #[allow(dead_code)]
    pub async fn handle_update(&self, payload: &str) -> ApiResponse {
        self.handle(Operation::Update, payload).await
    }

    /// Creation is an unconditional insert under a fresh id; no duplicate check.
    #[instrument(fields(product_name = %payload.name), skip(self, payload))]
    pub async fn create(&self, payload: ProductCreate) -> Result<Product, CatalogError> {
        let product = Product::from_create((self.next_id)(), payload);

        if let Err(e) = self.store.put(product.clone()).await {
            error!(error = %e, product_id = %product.id, "Failed to store new product");
            return Err(e.into());
        }

        info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(fields(product_id = %id), skip(self, id))]
    pub async fn read(&self, id: String) -> Result<Product, CatalogError> {
        match self.store.get_by_id(id.clone()).await {
            Ok(Some(product)) => {
                info!(product_name = %product.name, "Product found");
                Ok(product)
            }
            Ok(None) => {
                debug!("Product not found");
                Err(CatalogError::NotFound(id))
            }
            Err(e) => {
                error!(error = %e, "Failed to look up product");
                Err(e.into())
            }
        }
    }

    /// Full scan, order as returned by the store.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        match self.store.scan_all().await {
            Ok(products) => {
                info!(product_count = products.len(), "Listed products");
                Ok(products)
            }
            Err(e) => {
                error!(error = %e, "Failed to scan products");
                Err(e.into())
            }
        }
    }

    /// Read-modify-write of the two mutable fields. There is no conditional
    /// write, so two concurrent updates of the same id resolve last-writer-wins.
    /// An empty patch still rewrites the record unchanged.
    #[instrument(fields(product_id = %id), skip(self, id, patch))]
    pub async fn update(&self, id: String, patch: ProductPatch) -> Result<Product, CatalogError> {
        let mut product = self.read(id).await?;

        if patch.is_empty() {
            debug!("Empty patch, rewriting product unchanged");
        }
        product.apply_patch(patch);

        if let Err(e) = self.store.put(product.clone()).await {
            error!(error = %e, "Failed to store updated product");
            return Err(e.into());
        }

        info!("Product updated successfully");
        Ok(product)
    }
}
